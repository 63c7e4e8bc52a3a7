//! Application state wiring configuration to services.
//!
//! Services are built on demand so `colloquy complete` only needs the text
//! provider's key and `colloquy chat` only the chat provider's.

use colloquy_core::chat::service::ChatSessionService;
use colloquy_core::text::service::TextCompletionService;
use colloquy_infra::config::{load_config, resolve_data_dir};
use colloquy_infra::llm::{create_chat_provider, create_text_provider, resolve_api_key};
use colloquy_types::config::ColloquyConfig;

pub struct AppState {
    pub config: ColloquyConfig,
}

impl AppState {
    /// Resolve the data directory and load `config.toml` from it.
    pub async fn init() -> Self {
        let data_dir = resolve_data_dir();
        let config = load_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), "Configuration loaded");
        Self { config }
    }

    pub fn chat_service(&self) -> anyhow::Result<ChatSessionService> {
        let api_key = resolve_api_key(&self.config.chat);
        let provider = create_chat_provider(&self.config.chat, api_key.as_deref())?;
        Ok(ChatSessionService::new(provider))
    }

    pub fn text_service(&self) -> anyhow::Result<TextCompletionService> {
        let api_key = resolve_api_key(&self.config.text);
        let provider = create_text_provider(&self.config.text, api_key.as_deref())?;
        Ok(TextCompletionService::new(provider))
    }
}
