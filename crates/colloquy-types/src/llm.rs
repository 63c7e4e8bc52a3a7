//! LLM provider-facing types for Colloquy.
//!
//! These types model what comes back from a completion provider before it is
//! mapped into the domain [`Message`](crate::message::Message): the provider's
//! own role vocabulary, raw reply content, text chunks, and provider errors.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Role as reported by a completion provider.
///
/// Providers speak a wider vocabulary than [`Role`](crate::message::Role)
/// (tool and function turns, vendor-specific names). Anything not recognized
/// is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderRole {
    System,
    User,
    Assistant,
    Tool,
    Function,
    Other(String),
}

impl fmt::Display for ProviderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderRole::System => write!(f, "system"),
            ProviderRole::User => write!(f, "user"),
            ProviderRole::Assistant => write!(f, "assistant"),
            ProviderRole::Tool => write!(f, "tool"),
            ProviderRole::Function => write!(f, "function"),
            ProviderRole::Other(name) => write!(f, "{name}"),
        }
    }
}

impl FromStr for ProviderRole {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "system" => ProviderRole::System,
            "user" => ProviderRole::User,
            "assistant" => ProviderRole::Assistant,
            "tool" => ProviderRole::Tool,
            "function" => ProviderRole::Function,
            _ => ProviderRole::Other(s.to_string()),
        })
    }
}

impl From<String> for ProviderRole {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl From<ProviderRole> for String {
    fn from(role: ProviderRole) -> Self {
        role.to_string()
    }
}

/// A chat reply exactly as the provider returned it.
///
/// `content` may be empty; deciding whether that is an error is up to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: ProviderRole,
    pub content: String,
}

impl ProviderMessage {
    pub fn new(role: ProviderRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Whether the reply has no usable text (empty or whitespace only).
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// One piece of a multi-part text generation result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub text: String,
}

impl TextChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("context length exceeded")]
    ContextLengthExceeded,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_role_parse_known() {
        assert_eq!("System".parse::<ProviderRole>().unwrap(), ProviderRole::System);
        assert_eq!("tool".parse::<ProviderRole>().unwrap(), ProviderRole::Tool);
        assert_eq!(
            "function".parse::<ProviderRole>().unwrap(),
            ProviderRole::Function
        );
    }

    #[test]
    fn test_provider_role_keeps_unknown_verbatim() {
        let role: ProviderRole = "Developer".parse().unwrap();
        assert_eq!(role, ProviderRole::Other("Developer".to_string()));
        assert_eq!(role.to_string(), "Developer");
    }

    #[test]
    fn test_provider_role_serde() {
        let json = serde_json::to_string(&ProviderRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: ProviderRole = serde_json::from_str("\"critic\"").unwrap();
        assert_eq!(parsed, ProviderRole::Other("critic".to_string()));
    }

    #[test]
    fn test_provider_message_is_blank() {
        assert!(ProviderMessage::new(ProviderRole::Assistant, "").is_blank());
        assert!(ProviderMessage::new(ProviderRole::Assistant, " \n\t").is_blank());
        assert!(!ProviderMessage::new(ProviderRole::Assistant, "ok").is_blank());
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::RateLimited {
            retry_after_ms: Some(1500),
        };
        assert!(err.to_string().contains("1500"));
        assert_eq!(LlmError::AuthenticationFailed.to_string(), "authentication failed");
    }
}
