use thiserror::Error;

use crate::chat::SessionId;
use crate::llm::LlmError;

/// Errors from session store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("chat session {0} not found")]
    NotFound(SessionId),
}

/// Errors surfaced by the chat and text completion services.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("chat session {0} not found")]
    SessionNotFound(SessionId),

    #[error("no response received from the completion provider")]
    EmptyCompletion,

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Provider(#[from] LlmError),
}

impl From<StoreError> for CompletionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => CompletionError::SessionNotFound(id),
        }
    }
}

/// Errors from loading host configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing API key: environment variable '{0}' is not set")]
    MissingApiKey(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
