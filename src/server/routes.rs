//! HTTP route handlers for the chat API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::chat::{ChatError, Message};

use super::state::AppState;

/// Cookie carrying the opaque conversation identity.
const SESSION_COOKIE: &str = "hearth_session";

/// Chat page served at the root, embedded at build time.
const INDEX_PAGE: &str = include_str!("../../static/index.html");

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/chat", post(chat))
        .route("/api/clear", post(clear_history))
        .route("/api/history", get(get_history))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

/// Serve the chat interface, establishing a session identity if absent.
async fn index(headers: HeaderMap) -> Response {
    let (_, set_cookie) = session_identity(&headers);
    with_session_cookie(Html(INDEX_PAGE).into_response(), set_cookie)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "hearth-chat",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

/// Successful chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub response: String,
    /// Always `true` on the success path.
    pub success: bool,
    /// Model that produced the reply.
    pub model: String,
}

/// Handle chat messages.
async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Response {
    let (session_id, set_cookie) = session_identity(&headers);

    let response = match state.engine.send(&session_id, &request.message).await {
        Ok(reply) => Json(ChatResponse {
            response: reply,
            success: true,
            model: state.engine.model().to_string(),
        })
        .into_response(),
        Err(err) => error_response(&err),
    };

    with_session_cookie(response, set_cookie)
}

/// Clear the caller's conversation history.
async fn clear_history(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (session_id, set_cookie) = session_identity(&headers);
    state.engine.clear(&session_id);

    let response = Json(serde_json::json!({
        "success": true,
        "message": "Conversation cleared"
    }))
    .into_response();

    with_session_cookie(response, set_cookie)
}

/// Conversation history response body.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Ordered role-tagged messages, empty if none.
    pub history: Vec<Message>,
}

/// Return the caller's conversation history.
async fn get_history(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let (session_id, set_cookie) = session_identity(&headers);
    let history = state.engine.history(&session_id);

    with_session_cookie(Json(HistoryResponse { history }).into_response(), set_cookie)
}

/// Map a chat error to its HTTP status and JSON body.
///
/// Validation failures answer 400 with a bare error; remote failures keep the
/// original `success: false` marker on 429 and 500.
fn error_response(err: &ChatError) -> Response {
    match err {
        ChatError::EmptyMessage => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": err.to_string() })),
        )
            .into_response(),
        ChatError::Throttled => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({ "error": err.to_string(), "success": false })),
        )
            .into_response(),
        ChatError::Upstream(_) | ChatError::MissingApiKey => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": err.to_string(), "success": false })),
        )
            .into_response(),
    }
}

/// Resolve the caller's conversation identity from the session cookie.
///
/// Returns the identity plus a `Set-Cookie` value when a fresh identity had
/// to be minted. The core only ever sees the opaque key; cookie mechanics
/// stop here.
fn session_identity(headers: &HeaderMap) -> (String, Option<String>) {
    if let Some(id) = cookie_value(headers, SESSION_COOKIE) {
        return (id, None);
    }

    let id = Uuid::new_v4().to_string();
    let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
    (id, Some(cookie))
}

/// Extract a cookie value by name from the request headers.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Append a `Set-Cookie` header to a response when a new session was minted.
fn with_session_cookie(mut response: Response, set_cookie: Option<String>) -> Response {
    if let Some(cookie) = set_cookie {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; hearth_session=abc123; other=1"),
        );

        assert_eq!(
            cookie_value(&headers, SESSION_COOKIE).as_deref(),
            Some("abc123")
        );
        assert_eq!(cookie_value(&headers, "theme").as_deref(), Some("dark"));
        assert!(cookie_value(&headers, "missing").is_none());
    }

    #[test]
    fn test_cookie_value_ignores_empty_and_prefix_collisions() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("hearth_session_old=zzz; hearth_session="),
        );

        // A prefix-colliding name must not match, and an empty value counts
        // as absent.
        assert!(cookie_value(&headers, SESSION_COOKIE).is_none());
    }

    #[test]
    fn test_session_identity_reuses_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("hearth_session=known-id"));

        let (id, set_cookie) = session_identity(&headers);
        assert_eq!(id, "known-id");
        assert!(set_cookie.is_none());
    }

    #[test]
    fn test_session_identity_mints_new_cookie() {
        let headers = HeaderMap::new();
        let (id, set_cookie) = session_identity(&headers);

        let cookie = set_cookie.unwrap();
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={id}")));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn test_error_response_status_mapping() {
        assert_eq!(
            error_response(&ChatError::EmptyMessage).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(&ChatError::Throttled).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            error_response(&ChatError::Upstream("boom".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
