//! Connection settings for OpenAI-compatible providers.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "groq", "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.groq.com/openai/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier used when a request does not name one.
    pub model: String,
}

/// Infer a provider name from a base URL, for logs and span attributes.
pub fn provider_name_for(base_url: &str) -> &'static str {
    if base_url.contains("api.groq.com") {
        "groq"
    } else if base_url.contains("api.openai.com") {
        "openai"
    } else {
        "openai_compatible"
    }
}
