//! Text completion service.
//!
//! Forwards a prompt to a [`BoxTextProvider`] and joins the returned chunks.
//! Unlike the chat path, an empty result is not an error: no chunks (or only
//! empty ones) simply yield an empty string.

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span};

use colloquy_types::error::CompletionError;

use crate::llm::box_provider::BoxTextProvider;

/// Stateless prompt-to-text completion.
pub struct TextCompletionService {
    provider: BoxTextProvider,
}

impl TextCompletionService {
    pub fn new(provider: BoxTextProvider) -> Self {
        Self { provider }
    }

    /// Generate text for `prompt`, concatenating chunks in the order received.
    ///
    /// # Errors
    ///
    /// [`CompletionError::Cancelled`] if `cancel` fires before the provider
    /// answers; provider failures come back as [`CompletionError::Provider`].
    pub async fn get_content(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, CompletionError> {
        if cancel.is_cancelled() {
            return Err(CompletionError::Cancelled);
        }

        let span = info_span!(
            "gen_ai.text",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = self.provider.model(),
        );

        let chunks = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Text completion cancelled");
                return Err(CompletionError::Cancelled);
            }
            result = self.provider.generate(prompt).instrument(span) => result?,
        };

        debug!(chunks = chunks.len(), "Text completion received");
        Ok(chunks.iter().map(|c| c.text.as_str()).collect())
    }
}
