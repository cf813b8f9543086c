//! Startup helpers for the hearth-chat binaries.
//!
//! Configuration comes from the environment; the API token is the one
//! validated precondition and its absence keeps the process from starting.

use std::process::ExitCode;
use std::sync::Arc;

use crate::chat::{ChatEngine, ChatError, CompletionClient, DEFAULT_API_URL, DEFAULT_MODEL};
use crate::repl;
use crate::server::{self, AppState};

/// Environment variable holding the inference API bearer token. Required.
pub const API_KEY_ENV: &str = "HF_API_KEY";
/// Environment variable overriding the model identifier.
const MODEL_ENV: &str = "HEARTH_MODEL";
/// Environment variable overriding the completion base URL.
const API_URL_ENV: &str = "HEARTH_API_URL";
/// Environment variable overriding the web server port.
const PORT_ENV: &str = "HEARTH_PORT";

/// Build the chat engine from environment configuration.
///
/// # Errors
/// Returns [`ChatError::MissingApiKey`] when `HF_API_KEY` is unset, or an
/// error if the HTTP client cannot be built.
pub fn engine_from_env() -> Result<ChatEngine<CompletionClient>, ChatError> {
    let api_key = std::env::var(API_KEY_ENV).map_err(|_| ChatError::MissingApiKey)?;
    let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    let client = CompletionClient::new(api_key, base_url)?;
    Ok(ChatEngine::new(client, model))
}

/// Run the web server (used by the `hearth-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run_server() -> ExitCode {
    init_tracing();
    tracing::info!("Starting hearth-chat server v{}", env!("CARGO_PKG_VERSION"));

    let engine = match engine_from_env() {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::from(1);
        }
    };
    tracing::info!("Using model: {}", engine.model());

    let state: Arc<AppState> = AppState::new(engine);
    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(server::run_server(state, port)) {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Run the interactive chatbot (used by the `hearth` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on a normal quit, `1` on failure.
#[must_use]
pub fn run_chat() -> ExitCode {
    init_tracing();

    let engine = match engine_from_env() {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = rt.block_on(repl::run(&engine)) {
        tracing::error!("Terminal error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Get the configured server port.
#[must_use]
pub fn get_port() -> u16 {
    std::env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

/// Initialize structured logging at INFO by default, `RUST_LOG` overridable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}
