//! Host configuration types for Colloquy.
//!
//! `ColloquyConfig` represents the top-level `config.toml`. Chat and one-shot
//! text completion each get their own [`ProviderConfig`], so the two paths can
//! point at different providers or models. All fields have defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.colloquy/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColloquyConfig {
    /// Provider used for multi-turn chat sessions.
    #[serde(default)]
    pub chat: ProviderConfig,

    /// Provider used for stateless text completion.
    #[serde(default)]
    pub text: ProviderConfig,
}

/// Connection settings for one OpenAI-compatible provider.
///
/// The API key itself never lives in the config file: `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Well-known provider name ("openai", "gemini", "mistral") or a custom label.
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Override the default base URL for the provider.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model identifier to use.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: None,
            model: default_model(),
            api_key_env: default_api_key_env(),
            max_tokens: None,
            temperature: None,
        }
    }
}
