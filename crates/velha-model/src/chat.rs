//! Chat log entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlayerId, now_millis};

/// Maximum chat message length, in characters, after trimming.
pub const MAX_MESSAGE_LEN: usize = 200;

/// One entry in a match's append-only chat log.
///
/// Entries are only ever appended; there is no edit or delete. The
/// sender's display name is denormalized into the entry so readers
/// never need a profile lookup to render history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: PlayerId,
    pub user_name: String,
    pub message: String,
    pub timestamp: u64,
}

impl ChatMessage {
    /// Builds a new entry stamped with a fresh id and the current time.
    /// `text` is stored as given; trimming and the length cap are
    /// enforced by the chat channel before construction.
    pub fn new(user_id: PlayerId, user_name: &str, text: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            user_name: user_name.to_string(),
            message: text.to_string(),
            timestamp: now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_wire_format() {
        let msg = ChatMessage::new(PlayerId::generate(), "Ana", "bom jogo");
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("userId").is_some());
        assert_eq!(json["userName"], "Ana");
        assert_eq!(json["message"], "bom jogo");
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_chat_message_ids_are_unique() {
        let sender = PlayerId::generate();
        let a = ChatMessage::new(sender, "Ana", "oi");
        let b = ChatMessage::new(sender, "Ana", "oi");
        assert_ne!(a.id, b.id);
    }
}
