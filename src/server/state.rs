//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::chat::{ChatEngine, CompletionClient};

/// Shared application state.
///
/// Constructed once at process start and passed into every handler; nothing
/// here is reached through globals.
pub struct AppState {
    /// Chat engine: conversation store plus completion client.
    pub engine: ChatEngine<CompletionClient>,
}

impl AppState {
    /// Wrap a configured engine for sharing across handlers.
    #[must_use]
    pub fn new(engine: ChatEngine<CompletionClient>) -> Arc<Self> {
        Arc::new(Self { engine })
    }
}
