//! Chat session service orchestrating one conversation turn.
//!
//! `ChatSessionService` ties the [`SessionStore`] to a [`BoxChatProvider`]:
//! a send appends the user turn, replays the full history to the provider,
//! and appends the assistant turn once a non-blank reply comes back.
//!
//! Two sends racing on the same session are not serialized. Each append is
//! atomic, but the second user turn may land before the first assistant turn.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span, warn};

use colloquy_types::chat::SessionId;
use colloquy_types::error::CompletionError;
use colloquy_types::message::Message;

use crate::llm::box_provider::BoxChatProvider;
use crate::llm::role::map_provider_message;

use super::store::SessionStore;

/// Stateful multi-turn chat over an in-memory session store.
pub struct ChatSessionService {
    store: Arc<SessionStore>,
    provider: BoxChatProvider,
}

impl ChatSessionService {
    /// Create a service with its own empty session store.
    pub fn new(provider: BoxChatProvider) -> Self {
        Self::with_store(Arc::new(SessionStore::new()), provider)
    }

    /// Create a service over an existing (possibly shared) store.
    pub fn with_store(store: Arc<SessionStore>, provider: BoxChatProvider) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Start a new chat session, optionally seeded with a first user message.
    pub fn start_new_chat(&self, initial_message: Option<&str>) -> SessionId {
        self.store.create(initial_message)
    }

    /// Pick the session a send goes to.
    ///
    /// An explicit id is used as-is (it may still turn out to be unknown).
    /// `None` or the nil sentinel starts a fresh temporary session.
    pub fn resolve_session(&self, session_id: Option<SessionId>) -> SessionId {
        match session_id {
            Some(id) if !id.is_nil() => id,
            _ => {
                let id = self.start_new_chat(None);
                debug!(session_id = %id, "Sending to a temporary chat session");
                id
            }
        }
    }

    /// Send a user message and return the assistant's reply.
    ///
    /// The user turn is recorded before the provider is called and stays in
    /// the history if the call fails, comes back blank, or is cancelled. The
    /// assistant turn is only recorded on success.
    ///
    /// # Errors
    ///
    /// - [`CompletionError::SessionNotFound`] for an explicit, unknown id
    /// - [`CompletionError::EmptyCompletion`] if the reply is blank
    /// - [`CompletionError::Cancelled`] if `cancel` fires first
    /// - [`CompletionError::Provider`] for provider failures, unchanged
    pub async fn send_message(
        &self,
        message: &str,
        session_id: Option<SessionId>,
        cancel: &CancellationToken,
    ) -> Result<Message, CompletionError> {
        if cancel.is_cancelled() {
            return Err(CompletionError::Cancelled);
        }

        let id = self.resolve_session(session_id);
        self.store.append(id, Message::user(message))?;
        let history = self.store.history(id)?;

        let span = info_span!(
            "gen_ai.chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = self.provider.model(),
            session_id = %id,
            history_len = history.len(),
        );

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(session_id = %id, "Chat completion cancelled");
                return Err(CompletionError::Cancelled);
            }
            result = self.provider.complete(&history).instrument(span) => result?,
        };

        if response.is_blank() {
            warn!(session_id = %id, provider = self.provider.name(), "Provider returned an empty chat completion");
            return Err(CompletionError::EmptyCompletion);
        }

        self.store
            .append(id, Message::assistant(response.content.clone()))?;
        Ok(map_provider_message(response))
    }

    /// The last assistant reply in a session, or `None` if there is none yet.
    pub fn get_last_response(&self, session_id: SessionId) -> Result<Option<Message>, CompletionError> {
        Ok(self.store.last_assistant_message(session_id)?)
    }

    /// Ordered snapshot of a session's history.
    pub fn history(&self, session_id: SessionId) -> Result<Vec<Message>, CompletionError> {
        Ok(self.store.history(session_id)?)
    }
}
