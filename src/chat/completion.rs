//! Remote chat-completion invocation.
//!
//! Sends the full ordered message sequence to an OpenAI-compatible
//! `chat/completions` endpoint with a bearer token and extracts the reply
//! text from the first completion choice. Failures are classified into
//! throttling vs. everything else; no automatic retry is performed.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ChatError;
use super::types::{MAX_TOKENS, Message, TEMPERATURE};

/// Default base URL of the hosted inference router (OpenAI-compatible).
pub const DEFAULT_API_URL: &str = "https://router.huggingface.co/v1";

/// Connection timeout for the completion endpoint.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Request timeout for long generations.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Remote capability that turns an ordered message sequence into a reply.
///
/// The sequence is replayed verbatim; implementations must not mutate any
/// conversation state, appending the reply is the caller's responsibility.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Request a completion for `messages` and return the reply text.
    ///
    /// # Errors
    /// Returns [`ChatError::Throttled`] when the failure looks like remote
    /// rate limiting, [`ChatError::Upstream`] for anything else.
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, ChatError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
pub struct CompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CompletionClient {
    /// Create a client for the endpoint rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::classify(&e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The status line feeds classification, so an HTTP 429 is always
            // recognized as throttling even with an empty body.
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("completion endpoint returned {status}: {body}");
            return Err(ChatError::classify(&format!("{status}: {body}")));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::classify(&e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ChatError::Upstream("completion returned no choices".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::user("Hello")];
        let request = CompletionRequest {
            model: "meta-llama/Llama-3.2-3B-Instruct",
            messages: &messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "meta-llama/Llama-3.2-3B-Instruct");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hello");
    }

    #[test]
    fn test_response_extracts_first_choice() {
        let raw = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Hi there"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        let reply = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        assert_eq!(reply.as_deref(), Some("Hi there"));
    }

    #[test]
    fn test_response_without_choices() {
        let parsed: CompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
