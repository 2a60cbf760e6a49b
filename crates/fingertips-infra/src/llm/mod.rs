//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](fingertips_core::llm::provider::LlmProvider)
//! implementation and a factory ([`create_provider`]) that builds it from
//! configuration.

pub mod openai_compat;

use secrecy::{ExposeSecret, SecretString};

use fingertips_core::llm::box_provider::BoxLlmProvider;
use fingertips_types::config::FileConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, provider_name_for};

/// Create a [`BoxLlmProvider`] from configuration and the resolved API key.
///
/// Returns `None` when no key is available. Startup carries on without a
/// provider so the server can still answer with a configuration error per
/// request.
pub fn create_provider(config: &FileConfig, api_key: Option<&SecretString>) -> Option<BoxLlmProvider> {
    let Some(api_key) = api_key else {
        tracing::warn!("No provider API key configured; chat requests will be rejected");
        return None;
    };

    let provider_config = provider_config(config, api_key);
    tracing::info!(
        provider = %provider_config.provider_name,
        model = %provider_config.model,
        base_url = %provider_config.base_url,
        "Completion provider configured"
    );

    Some(BoxLlmProvider::new(OpenAiCompatibleProvider::new(provider_config)))
}

fn provider_config(config: &FileConfig, api_key: &SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: provider_name_for(&config.base_url).to_string(),
        base_url: config.base_url.clone(),
        api_key: SecretString::from(api_key.expose_secret().to_string()),
        model: config.completion.model.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_without_key() {
        assert!(create_provider(&FileConfig::default(), None).is_none());
    }

    #[test]
    fn test_create_provider_groq_by_default() {
        let key = SecretString::from("gsk-test".to_string());
        let provider = create_provider(&FileConfig::default(), Some(&key)).unwrap();
        assert_eq!(provider.name(), "groq");
    }

    #[test]
    fn test_provider_config_defaults_to_groq() {
        let key = SecretString::from("gsk-test".to_string());
        let config = provider_config(&FileConfig::default(), &key);
        assert_eq!(config.provider_name, "groq");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.api_key.expose_secret(), "gsk-test");
    }

    #[test]
    fn test_provider_config_custom_base_url() {
        let mut file = FileConfig::default();
        file.base_url = "http://localhost:11434/v1".to_string();
        file.completion.model = "llama3".to_string();

        let key = SecretString::from("local".to_string());
        let config = provider_config(&file, &key);
        assert_eq!(config.provider_name, "openai_compatible");
        assert_eq!(config.model, "llama3");

        let provider = create_provider(&file, Some(&key)).unwrap();
        assert_eq!(provider.name(), "openai_compatible");
    }
}
