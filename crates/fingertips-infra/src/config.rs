//! Configuration loader for Fingertips.
//!
//! Secrets and the store location come from the process environment (after
//! loading `.env` if present). Non-secret settings come from an optional
//! `fingertips.toml`, falling back to defaults when the file is missing or
//! malformed. Everything is read once at process start.

use std::path::Path;

use secrecy::SecretString;

use fingertips_types::config::FileConfig;

use crate::sqlite::pool::DEFAULT_DATABASE_URL;

/// Environment variables checked, in order, for the provider API key.
pub const API_KEY_VARS: [&str; 2] = ["GROQ_API", "GROQ_API_KEY"];

/// Environment variables checked, in order, for the store connection string.
pub const DATABASE_URL_VARS: [&str; 2] = ["FINGERTIPS_DATABASE_URL", "DATABASE_URL"];

/// Fully resolved process configuration.
pub struct Settings {
    pub database_url: String,
    /// `None` when no key is set; every chat request then fails with a
    /// configuration error.
    pub api_key: Option<SecretString>,
    pub file: FileConfig,
}

impl Settings {
    /// Load `.env`, then resolve settings from the environment and `config_path`.
    pub async fn load(config_path: &Path) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {e}");
        }

        let lookup = |name: &str| std::env::var(name).ok();
        Self {
            database_url: resolve_database_url(lookup),
            api_key: resolve_api_key(lookup),
            file: load_file_config(config_path).await,
        }
    }
}

/// First non-blank value among `names`.
fn first_set(names: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    names
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Resolve the provider API key. Blank values count as absent.
pub fn resolve_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
    first_set(&API_KEY_VARS, lookup).map(SecretString::from)
}

/// Resolve the store connection string, defaulting to `./fingertips.db`.
pub fn resolve_database_url(lookup: impl Fn(&str) -> Option<String>) -> String {
    first_set(&DATABASE_URL_VARS, lookup).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Load file configuration from `path`.
///
/// - If the file does not exist, returns [`FileConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_file_config(path: &Path) -> FileConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return FileConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return FileConfig::default();
        }
    };

    match toml::from_str::<FileConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn resolve_api_key_prefers_groq_api() {
        let key = resolve_api_key(env(&[("GROQ_API", "gsk-1"), ("GROQ_API_KEY", "gsk-2")]));
        assert_eq!(key.unwrap().expose_secret(), "gsk-1");
    }

    #[test]
    fn resolve_api_key_falls_back_to_alias() {
        let key = resolve_api_key(env(&[("GROQ_API_KEY", "gsk-2")]));
        assert_eq!(key.unwrap().expose_secret(), "gsk-2");
    }

    #[test]
    fn resolve_api_key_blank_is_absent() {
        assert!(resolve_api_key(env(&[("GROQ_API", "   ")])).is_none());
        assert!(resolve_api_key(env(&[])).is_none());
    }

    #[test]
    fn resolve_database_url_default_and_override() {
        assert_eq!(resolve_database_url(env(&[])), DEFAULT_DATABASE_URL);
        assert_eq!(
            resolve_database_url(env(&[("DATABASE_URL", "sqlite://other.db")])),
            "sqlite://other.db"
        );
        assert_eq!(
            resolve_database_url(env(&[
                ("FINGERTIPS_DATABASE_URL", "sqlite://mine.db"),
                ("DATABASE_URL", "sqlite://other.db"),
            ])),
            "sqlite://mine.db"
        );
    }

    #[tokio::test]
    async fn load_file_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_file_config(&tmp.path().join("fingertips.toml")).await;
        assert_eq!(config, FileConfig::default());
    }

    #[tokio::test]
    async fn load_file_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fingertips.toml");
        tokio::fs::write(
            &path,
            r#"
base_url = "http://localhost:11434/v1"

[completion]
model = "llama3"
max_tokens = 256
"#,
        )
        .await
        .unwrap();

        let config = load_file_config(&path).await;
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.completion.model, "llama3");
        assert_eq!(config.completion.max_tokens, 256);
    }

    #[tokio::test]
    async fn load_file_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fingertips.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_file_config(&path).await;
        assert_eq!(config, FileConfig::default());
    }
}
