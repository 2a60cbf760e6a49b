//! Configuration types for Fingertips.
//!
//! `FileConfig` represents the optional `fingertips.toml` that controls model
//! selection and the HTTP bind address. Secrets never live here; they come
//! from the environment.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Top-level contents of `fingertips.toml`. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub completion: CompletionSettings,

    /// OpenAI-compatible endpoint the provider talks to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub server: ServerSettings,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            completion: CompletionSettings::default(),
            base_url: default_base_url(),
            server: ServerSettings::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Parameters sent with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSettings {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Unset means the provider's default.
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_default_values() {
        let config = FileConfig::default();
        assert_eq!(config.completion.model, "llama3-8b-8192");
        assert_eq!(config.completion.max_tokens, 1024);
        assert!(config.completion.temperature.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
[completion]
model = "llama-3.1-8b-instant"
temperature = 0.2

[server]
port = 9000
"#,
        )
        .unwrap();
        assert_eq!(config.completion.model, "llama-3.1-8b-instant");
        assert_eq!(config.completion.max_tokens, 1024);
        assert_eq!(config.completion.temperature, Some(0.2));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
    }
}
