//! Error types for chat operations.

use thiserror::Error;

/// Errors that can occur while chatting with the hosted inference API.
#[derive(Debug, Error)]
pub enum ChatError {
    /// API token missing from the environment. Fatal at startup.
    #[error(
        "API key required. Set the HF_API_KEY environment variable with a Hugging Face token."
    )]
    MissingApiKey,

    /// Empty or whitespace-only user message. Reported, never fatal.
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// Remote rate limiting detected. Reported, never fatal, no retry.
    #[error("Rate limit reached. Please wait a moment and try again.")]
    Throttled,

    /// Any other remote or call failure, carrying the raw error text.
    #[error("API Error: {0}")]
    Upstream(String),
}

impl ChatError {
    /// Classify a remote failure from its textual description.
    ///
    /// The text is scanned case-insensitively for the substring `rate limit`
    /// or the code `429`; a match classifies as [`ChatError::Throttled`],
    /// anything else as [`ChatError::Upstream`] with the raw text preserved.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        if lowered.contains("rate limit") || lowered.contains("429") {
            Self::Throttled
        } else {
            Self::Upstream(raw.to_string())
        }
    }

    /// Check if this error is the non-fatal rate-limit classification.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status_code() {
        let err = ChatError::classify("Error 429: Too Many Requests");
        assert!(err.is_throttled());
    }

    #[test]
    fn test_classify_rate_limit_any_case() {
        assert!(ChatError::classify("Rate Limit reached").is_throttled());
        assert!(ChatError::classify("RATE LIMIT exceeded for tier").is_throttled());
        assert!(ChatError::classify("rate limit").is_throttled());
    }

    #[test]
    fn test_classify_upstream() {
        let err = ChatError::classify("model not found");
        assert!(!err.is_throttled());
        match err {
            ChatError::Upstream(raw) => assert_eq!(raw, "model not found"),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_upstream_display_keeps_raw_text() {
        let err = ChatError::classify("connection refused");
        assert_eq!(err.to_string(), "API Error: connection refused");
    }
}
