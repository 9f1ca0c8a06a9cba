//! Chat channel: validation for the append-only message log.

use velha_model::{ChatMessage, PlayerId, MAX_MESSAGE_LEN};

use crate::MatchError;

/// Validates raw input and builds a chat entry: trims surrounding
/// whitespace, rejects empty messages and messages over the length cap.
///
/// The entry is appended to the match document through the store's
/// atomic list append, never a full-log rewrite, so two participants
/// sending at the same instant both land.
pub fn prepare_message(
    sender: PlayerId,
    sender_name: &str,
    text: &str,
) -> Result<ChatMessage, MatchError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(MatchError::EmptyMessage);
    }
    if text.chars().count() > MAX_MESSAGE_LEN {
        return Err(MatchError::MessageTooLong);
    }
    Ok(ChatMessage::new(sender, sender_name, text))
}
