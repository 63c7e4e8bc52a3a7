//! Object-safe dynamic dispatch wrappers for the provider traits.
//!
//! Same blanket-impl pattern for both traits:
//! 1. Define an object-safe `*Dyn` trait with boxed futures
//! 2. Blanket-impl it for every implementor of the RPITIT trait
//! 3. The `Box*Provider` struct wraps `Box<dyn *Dyn>` and delegates

use futures_util::future::BoxFuture;

use colloquy_types::llm::{LlmError, ProviderMessage, TextChunk};
use colloquy_types::message::Message;

use super::provider::{ChatProvider, TextProvider};

/// Object-safe version of [`ChatProvider`] with boxed futures.
pub trait ChatProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        history: &'a [Message],
    ) -> BoxFuture<'a, Result<ProviderMessage, LlmError>>;
}

impl<T: ChatProvider> ChatProviderDyn for T {
    fn name(&self) -> &str {
        ChatProvider::name(self)
    }

    fn model(&self) -> &str {
        ChatProvider::model(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        history: &'a [Message],
    ) -> BoxFuture<'a, Result<ProviderMessage, LlmError>> {
        Box::pin(self.complete(history))
    }
}

/// Type-erased chat provider for runtime provider selection.
///
/// Since `ChatProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxChatProvider` provides equivalent methods that delegate to
/// the inner `ChatProviderDyn` trait object.
pub struct BoxChatProvider {
    inner: Box<dyn ChatProviderDyn>,
}

impl BoxChatProvider {
    /// Wrap a concrete `ChatProvider` in a type-erased box.
    pub fn new<T: ChatProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Complete a conversation. See [`ChatProvider::complete`].
    pub async fn complete(&self, history: &[Message]) -> Result<ProviderMessage, LlmError> {
        self.inner.complete_boxed(history).await
    }
}

/// Object-safe version of [`TextProvider`] with boxed futures.
pub trait TextProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<Vec<TextChunk>, LlmError>>;
}

impl<T: TextProvider> TextProviderDyn for T {
    fn name(&self) -> &str {
        TextProvider::name(self)
    }

    fn model(&self) -> &str {
        TextProvider::model(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<Vec<TextChunk>, LlmError>> {
        Box::pin(self.generate(prompt))
    }
}

/// Type-erased text provider for runtime provider selection.
pub struct BoxTextProvider {
    inner: Box<dyn TextProviderDyn>,
}

impl BoxTextProvider {
    /// Wrap a concrete `TextProvider` in a type-erased box.
    pub fn new<T: TextProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Generate text chunks. See [`TextProvider::generate`].
    pub async fn generate(&self, prompt: &str) -> Result<Vec<TextChunk>, LlmError> {
        self.inner.generate_boxed(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_types::llm::ProviderRole;
    use std::future::Future;

    struct EchoProvider;

    impl ChatProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        fn complete(
            &self,
            history: &[Message],
        ) -> impl Future<Output = Result<ProviderMessage, LlmError>> + Send {
            let last = history.last().map(|m| m.content().to_string()).unwrap_or_default();
            async move { Ok(ProviderMessage::new(ProviderRole::Assistant, last)) }
        }
    }

    impl TextProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        fn generate(
            &self,
            prompt: &str,
        ) -> impl Future<Output = Result<Vec<TextChunk>, LlmError>> + Send {
            let chunk = TextChunk::new(prompt);
            async move { Ok(vec![chunk]) }
        }
    }

    #[tokio::test]
    async fn test_box_chat_provider_delegates() {
        let provider = BoxChatProvider::new(EchoProvider);
        assert_eq!(provider.name(), "echo");
        assert_eq!(provider.model(), "echo-1");

        let reply = provider
            .complete(&[Message::user("first"), Message::user("second")])
            .await
            .unwrap();
        assert_eq!(reply.content, "second");
        assert_eq!(reply.role, ProviderRole::Assistant);
    }

    #[tokio::test]
    async fn test_box_text_provider_delegates() {
        let provider = BoxTextProvider::new(EchoProvider);
        assert_eq!(provider.name(), "echo");

        let chunks = provider.generate("hello").await.unwrap();
        assert_eq!(chunks, vec![TextChunk::new("hello")]);
    }
}
