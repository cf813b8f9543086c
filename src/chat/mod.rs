//! Conversation-history management and remote chat invocation.
//!
//! This module is the behavioral core shared by the web server and the
//! command-line loop:
//! - [`ConversationStore`]: ordered role-tagged messages per identity
//! - [`CompletionClient`]: remote chat-completion calls
//! - [`ChatEngine`]: one chat turn (append, invoke, append reply)
//! - [`ChatError`]: error taxonomy and rate-limit classification

pub mod completion;
pub mod error;
pub mod store;
pub mod types;

pub use completion::{CompletionBackend, CompletionClient, DEFAULT_API_URL};
pub use error::ChatError;
pub use store::ConversationStore;
pub use types::{DEFAULT_MODEL, Message, Role};

/// Orchestrates one chat turn against a conversation identity.
///
/// The engine owns the conversation store; the completion backend receives a
/// read-only snapshot per call and never mutates history itself.
pub struct ChatEngine<B: CompletionBackend> {
    store: ConversationStore,
    backend: B,
    model: String,
}

impl<B: CompletionBackend> ChatEngine<B> {
    /// Create an engine with an empty store.
    pub fn new(backend: B, model: impl Into<String>) -> Self {
        Self {
            store: ConversationStore::new(),
            backend,
            model: model.into(),
        }
    }

    /// Model identifier sent with every completion request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one user message for `id` and return the assistant's reply.
    ///
    /// The user turn is appended before the remote call and is kept even when
    /// the call fails (no rollback); the assistant turn is appended only on
    /// success.
    ///
    /// # Errors
    /// Returns [`ChatError::EmptyMessage`] for empty or whitespace-only input
    /// (without touching the store), otherwise whatever classification the
    /// completion backend produced.
    pub async fn send(&self, id: &str, message: &str) -> Result<String, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.store.append(id, Message::user(message));
        let history = self.store.snapshot(id);

        let reply = self.backend.complete(&self.model, &history).await?;
        self.store
            .append(id, Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Full ordered history for `id`, empty if the identity is unknown.
    #[must_use]
    pub fn history(&self, id: &str) -> Vec<Message> {
        self.store.snapshot(id)
    }

    /// Reset the history for `id`. No-op for an unknown identity.
    pub fn clear(&self, id: &str) {
        self.store.clear(id);
    }
}
