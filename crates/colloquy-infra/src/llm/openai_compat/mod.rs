//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI, Google Gemini,
//! Mistral, and any self-hosted endpoint speaking the same protocol, via
//! configurable base URLs and factory functions. It implements both
//! [`ChatProvider`] and [`TextProvider`] over the chat completions endpoint.
//!
//! Uses [`async_openai`] for type-safe request/response handling.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionResponse, Role as OpenAiRole,
};
use secrecy::ExposeSecret;
use tracing::debug;

use colloquy_core::llm::provider::{ChatProvider, TextProvider};
use colloquy_types::llm::{LlmError, ProviderMessage, ProviderRole, TextChunk};
use colloquy_types::message::{Message, Role};

use self::config::OpenAiCompatConfig;

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] carrying `history` in order.
    fn build_request(&self, history: &[Message]) -> CreateChatCompletionRequest {
        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages: history.iter().map(to_openai_message).collect(),
            max_completion_tokens: self.max_tokens,
            temperature: self.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }

    async fn send(
        &self,
        request: CreateChatCompletionRequest,
    ) -> Result<CreateChatCompletionResponse, LlmError> {
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        debug!(
            provider = %self.provider_name,
            response_id = %response.id,
            choices = response.choices.len(),
            "Chat completion received"
        );
        Ok(response)
    }
}

impl ChatProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, history: &[Message]) -> Result<ProviderMessage, LlmError> {
        let response = self.send(self.build_request(history)).await?;

        // No choice or no content becomes an empty reply; the chat service
        // decides what that means.
        let reply = response
            .choices
            .into_iter()
            .next()
            .map(|c| {
                ProviderMessage::new(
                    map_openai_role(&c.message.role),
                    c.message.content.unwrap_or_default(),
                )
            })
            .unwrap_or_else(|| ProviderMessage::new(ProviderRole::Assistant, ""));

        Ok(reply)
    }
}

impl TextProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<Vec<TextChunk>, LlmError> {
        let request = self.build_request(&[Message::user(prompt)]);
        let response = self.send(request).await?;

        // One chunk per choice, in choice order.
        Ok(response
            .choices
            .into_iter()
            .map(|c| TextChunk::new(c.message.content.unwrap_or_default()))
            .collect())
    }
}

/// Convert a domain [`Message`] into an OpenAI request message.
fn to_openai_message(msg: &Message) -> ChatCompletionRequestMessage {
    match msg.role() {
        Role::System => ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
            content: ChatCompletionRequestSystemMessageContent::Text(msg.content().to_string()),
            name: None,
        }),
        Role::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(msg.content().to_string()),
            name: None,
        }),
        Role::Assistant => {
            #[allow(deprecated)]
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                    msg.content().to_string(),
                )),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

/// Translate the SDK's response role into the provider-neutral vocabulary.
fn map_openai_role(role: &OpenAiRole) -> ProviderRole {
    match role {
        OpenAiRole::System => ProviderRole::System,
        OpenAiRole::User => ProviderRole::User,
        OpenAiRole::Assistant => ProviderRole::Assistant,
        OpenAiRole::Tool => ProviderRole::Tool,
        OpenAiRole::Function => ProviderRole::Function,
        #[allow(unreachable_patterns)]
        other => ProviderRole::Other(format!("{other:?}").to_lowercase()),
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "invalid_api_key"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited {
                    retry_after_ms: None,
                }
            } else if code == "context_length_exceeded"
                || api_err.message.contains("maximum context length")
            {
                LlmError::ContextLengthExceeded
            } else if code == "server_error" || error_type == "overloaded_error" {
                LlmError::Overloaded(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited {
                retry_after_ms: None,
            },
            Some(503) | Some(529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn provider(model: &str) -> OpenAiCompatibleProvider {
        OpenAiCompatibleProvider::new(config::openai_defaults(
            SecretString::from("sk-test".to_string()),
            model,
        ))
    }

    #[test]
    fn test_new_provider_names() {
        let p = OpenAiCompatibleProvider::new(config::gemini_defaults(
            SecretString::from("gemini-key".to_string()),
            "gemini-2.5-pro",
        ));
        assert_eq!(ChatProvider::name(&p), "gemini");
        assert_eq!(TextProvider::model(&p), "gemini-2.5-pro");
    }

    #[test]
    fn test_build_request_keeps_history_order() {
        let p = provider("gpt-4o");
        let history = vec![
            Message::system("be brief"),
            Message::user("hi"),
            Message::assistant("hello"),
            Message::user("again"),
        ];
        let request = p.build_request(&history);
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 4);
        assert!(matches!(request.messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(request.messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(request.messages[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(request.messages[3], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_build_request_applies_sampling_settings() {
        let mut cfg = config::openai_defaults(SecretString::from("sk".to_string()), "gpt-4o");
        cfg.max_tokens = Some(128);
        cfg.temperature = Some(0.5);
        let p = OpenAiCompatibleProvider::new(cfg);

        let request = p.build_request(&[Message::user("x")]);
        assert_eq!(request.max_completion_tokens, Some(128));
        assert_eq!(request.temperature, Some(0.5));
    }

    #[test]
    fn test_user_message_content_is_passed_through() {
        match to_openai_message(&Message::user("what is 2+2?")) {
            ChatCompletionRequestMessage::User(m) => match m.content {
                ChatCompletionRequestUserMessageContent::Text(text) => {
                    assert_eq!(text, "what is 2+2?")
                }
                _ => panic!("expected text content"),
            },
            _ => panic!("expected user message"),
        }
    }

    #[test]
    fn test_map_openai_role() {
        assert_eq!(map_openai_role(&OpenAiRole::System), ProviderRole::System);
        assert_eq!(map_openai_role(&OpenAiRole::Assistant), ProviderRole::Assistant);
        assert_eq!(map_openai_role(&OpenAiRole::Tool), ProviderRole::Tool);
    }

    #[test]
    fn test_map_invalid_argument_error() {
        let err = map_openai_error(async_openai::error::OpenAIError::InvalidArgument(
            "bad model".to_string(),
        ));
        assert!(matches!(err, LlmError::InvalidRequest(msg) if msg == "bad model"));
    }
}
