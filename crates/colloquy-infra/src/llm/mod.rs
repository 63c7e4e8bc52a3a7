//! LLM provider implementations.
//!
//! Contains the concrete [`OpenAiCompatibleProvider`] and the factory
//! functions ([`create_chat_provider`], [`create_text_provider`]) that build
//! boxed providers from a [`ProviderConfig`].

pub mod openai_compat;

use secrecy::SecretString;

use colloquy_core::llm::box_provider::{BoxChatProvider, BoxTextProvider};
use colloquy_types::config::ProviderConfig;
use colloquy_types::error::ConfigError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{
    OpenAiCompatConfig, gemini_defaults, mistral_defaults, openai_defaults,
};

/// Read the API key named by `config.api_key_env` from the environment.
///
/// An unset or non-Unicode variable is treated as absent.
pub fn resolve_api_key(config: &ProviderConfig) -> Option<String> {
    std::env::var(&config.api_key_env).ok()
}

/// Create a [`BoxChatProvider`] from a [`ProviderConfig`].
///
/// # Errors
///
/// [`ConfigError::MissingApiKey`] when `api_key` is `None`,
/// [`ConfigError::Invalid`] when the model is blank.
pub fn create_chat_provider(
    config: &ProviderConfig,
    api_key: Option<&str>,
) -> Result<BoxChatProvider, ConfigError> {
    let provider = build_provider(config, api_key)?;
    Ok(BoxChatProvider::new(provider))
}

/// Create a [`BoxTextProvider`] from a [`ProviderConfig`].
///
/// Same error conditions as [`create_chat_provider`].
pub fn create_text_provider(
    config: &ProviderConfig,
    api_key: Option<&str>,
) -> Result<BoxTextProvider, ConfigError> {
    let provider = build_provider(config, api_key)?;
    Ok(BoxTextProvider::new(provider))
}

fn build_provider(
    config: &ProviderConfig,
    api_key: Option<&str>,
) -> Result<OpenAiCompatibleProvider, ConfigError> {
    let key = api_key.ok_or_else(|| ConfigError::MissingApiKey(config.api_key_env.clone()))?;
    if config.model.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "provider '{}' has no model configured",
            config.name
        )));
    }
    let secret = SecretString::from(key.to_string());

    // Use base_url if specified, otherwise infer from provider name
    let mut compat = match config.base_url.as_deref() {
        Some(base_url) => OpenAiCompatConfig {
            provider_name: config.name.clone(),
            base_url: base_url.to_string(),
            api_key: secret,
            model: config.model.clone(),
            max_tokens: None,
            temperature: None,
        },
        None => match config.name.as_str() {
            "gemini" => gemini_defaults(secret, &config.model),
            "mistral" => mistral_defaults(secret, &config.model),
            // Default to the OpenAI endpoint for "openai" and unknown names
            _ => openai_defaults(secret, &config.model),
        },
    };
    compat.max_tokens = config.max_tokens;
    compat.temperature = config.temperature;

    tracing::debug!(
        provider = %compat.provider_name,
        base_url = %compat.base_url,
        model = %compat.model,
        "Constructing OpenAI-compatible provider"
    );
    Ok(OpenAiCompatibleProvider::new(compat))
}
