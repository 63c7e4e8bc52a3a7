//! Configuration types and per-provider defaults for OpenAI-compatible providers.
//!
//! Each provider that speaks the OpenAI chat completions protocol gets a factory
//! function returning an [`OpenAiCompatConfig`] with the correct base URL.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. Does not derive
/// `Debug`; the key is wrapped in [`SecretString`] regardless.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o", "gemini-2.5-pro").
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl OpenAiCompatConfig {
    fn with_defaults(provider_name: &str, base_url: &str, api_key: SecretString, model: &str) -> Self {
        Self {
            provider_name: provider_name.into(),
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Base URL: `https://api.openai.com/v1`
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Base URL: `https://generativelanguage.googleapis.com/v1beta/openai`
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Base URL: `https://api.mistral.ai/v1`
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// OpenAI default configuration.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::with_defaults("openai", OPENAI_BASE_URL, api_key, model)
}

/// Google Gemini default configuration (OpenAI-compatible beta endpoint).
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::with_defaults("gemini", GEMINI_BASE_URL, api_key, model)
}

/// Mistral AI default configuration.
pub fn mistral_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig::with_defaults("mistral", MISTRAL_BASE_URL, api_key, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::from("sk-test".to_string())
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(key(), "gpt-4o");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, OPENAI_BASE_URL);
        assert_eq!(config.model, "gpt-4o");
        assert!(config.max_tokens.is_none());
    }

    #[test]
    fn test_gemini_defaults() {
        let config = gemini_defaults(key(), "gemini-2.5-pro");
        assert_eq!(config.provider_name, "gemini");
        assert!(config.base_url.contains("generativelanguage.googleapis.com"));
    }

    #[test]
    fn test_mistral_defaults() {
        let config = mistral_defaults(key(), "mistral-large-latest");
        assert_eq!(config.provider_name, "mistral");
        assert_eq!(config.base_url, MISTRAL_BASE_URL);
    }
}
