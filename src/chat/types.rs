//! Types for conversation turns and generation defaults.

use serde::{Deserialize, Serialize};

/// Default model served by the inference router.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.2-3B-Instruct";
// Other good free options:
// "microsoft/Phi-3.5-mini-instruct"
// "mistralai/Mistral-7B-Instruct-v0.3"
// "Qwen/Qwen2.5-7B-Instruct"

/// Token budget per completion. Fixed, not user-configurable.
pub const MAX_TOKENS: u32 = 1000;

/// Sampling temperature per completion. Fixed, not user-configurable.
pub const TEMPERATURE: f32 = 0.7;

/// Author of one conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message typed by the end user.
    User,
    /// A reply generated by the model.
    Assistant,
}

/// One turn in a conversation. Immutable once created; conversation order is
/// causal order and is replayed verbatim to the remote endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Role tag: `user` or `assistant` on the wire.
    pub role: Role,
    /// Message content.
    pub content: String,
}

impl Message {
    /// Create a user turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let message = Message::user("hello");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");

        let reply = Message::assistant("hi");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_role_roundtrip() {
        let message: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"ok"}"#).unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "ok");
    }
}
