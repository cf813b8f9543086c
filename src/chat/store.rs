//! In-memory conversation store keyed by an opaque identity.

use dashmap::DashMap;

use super::types::Message;

/// Maps a conversation identity (session id, or the sole CLI run) to its
/// ordered message sequence.
///
/// Entries are created lazily on first reference and live for the lifetime of
/// the process: no eviction, no size cap, no persistence. That is a known
/// limitation of this design, not a contract.
///
/// Individual operations are safe under concurrency, but the wider
/// append/invoke/append window of a chat turn is not serialized per identity:
/// two simultaneous messages from the same session may interleave their
/// appends in either order.
pub struct ConversationStore {
    conversations: DashMap<String, Vec<Message>>,
}

impl ConversationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            conversations: DashMap::new(),
        }
    }

    /// Get the sequence for `id`, creating an empty entry if absent.
    /// Returns a snapshot; never fails.
    #[must_use]
    pub fn get_or_create(&self, id: &str) -> Vec<Message> {
        self.conversations
            .entry(id.to_string())
            .or_default()
            .clone()
    }

    /// Append a message to the identified sequence, creating it if absent.
    pub fn append(&self, id: &str, message: Message) {
        self.conversations
            .entry(id.to_string())
            .or_default()
            .push(message);
    }

    /// Reset the identified sequence to empty. No-op for an unknown `id`.
    pub fn clear(&self, id: &str) {
        if let Some(mut entry) = self.conversations.get_mut(id) {
            entry.clear();
        }
    }

    /// Full ordered snapshot of the sequence for `id`, empty if unknown.
    #[must_use]
    pub fn snapshot(&self, id: &str) -> Vec<Message> {
        self.conversations
            .get(id)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Number of messages recorded for `id`, zero if unknown.
    #[must_use]
    pub fn len(&self, id: &str) -> usize {
        self.conversations.get(id).map_or(0, |entry| entry.len())
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::Role;

    #[test]
    fn test_get_or_create_starts_empty() {
        let store = ConversationStore::new();
        assert!(store.get_or_create("s1").is_empty());
        // The entry now exists and is still empty.
        assert_eq!(store.len("s1"), 0);
    }

    #[test]
    fn test_append_preserves_order() {
        let store = ConversationStore::new();
        store.append("s1", Message::user("first"));
        store.append("s1", Message::assistant("second"));
        store.append("s1", Message::user("third"));

        let history = store.snapshot("s1");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "first");
        assert_eq!(history[1].content, "second");
        assert_eq!(history[2].content, "third");
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
    }

    #[test]
    fn test_clear_known_and_unknown() {
        let store = ConversationStore::new();
        store.append("s1", Message::user("hello"));

        store.clear("s1");
        assert!(store.snapshot("s1").is_empty());

        // Unknown identity: no-op, never an error.
        store.clear("never-seen");
        assert!(store.snapshot("never-seen").is_empty());
    }

    #[test]
    fn test_snapshot_unknown_is_empty() {
        let store = ConversationStore::new();
        assert!(store.snapshot("missing").is_empty());
        assert_eq!(store.len("missing"), 0);
    }

    #[test]
    fn test_identities_are_independent() {
        let store = ConversationStore::new();
        store.append("a", Message::user("for a"));
        store.append("b", Message::user("for b"));

        assert_eq!(store.len("a"), 1);
        assert_eq!(store.len("b"), 1);
        store.clear("a");
        assert_eq!(store.len("a"), 0);
        assert_eq!(store.len("b"), 1);
    }
}
