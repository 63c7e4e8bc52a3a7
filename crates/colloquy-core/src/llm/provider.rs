//! Provider trait definitions.
//!
//! These are the two seams between Colloquy and an LLM SDK: multi-turn chat
//! completion and single-shot text generation. Both use native async fn in
//! traits (RPITIT, Rust 2024 edition); see [`super::box_provider`] for the
//! object-safe wrappers.

use std::future::Future;

use colloquy_types::llm::{LlmError, ProviderMessage, TextChunk};
use colloquy_types::message::Message;

/// Backend that produces the next assistant turn of a conversation.
///
/// Implementations live in colloquy-infra (e.g., `OpenAiChatProvider`).
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "gemini").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Complete a conversation.
    ///
    /// `history` is the full, ordered conversation. Implementations must send
    /// it as-is: no truncation, no reordering. The reply's content may be empty.
    fn complete(
        &self,
        history: &[Message],
    ) -> impl Future<Output = Result<ProviderMessage, LlmError>> + Send;
}

/// Backend that turns a single prompt into generated text.
pub trait TextProvider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Generate text for `prompt`, returned as zero or more ordered chunks.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<Vec<TextChunk>, LlmError>> + Send;
}
