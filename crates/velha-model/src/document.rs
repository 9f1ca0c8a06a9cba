//! The match document: the single shared record for one online match.

use serde::{Deserialize, Serialize};

use crate::{Board, ChatMessage, Mark, MatchId, Outcome, PlayerId, now_millis};

/// Lifecycle status of a match document.
///
/// ```text
/// Waiting ──(guest joins)──→ Playing ──(terminal board)──→ Finished
///                               ↑                              │
///                               └───────(rematch accepted)─────┘
/// ```
///
/// Any state can also end in deletion: a participant leaves, declines a
/// rematch, or the host cancels a waiting room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Waiting,
    Playing,
    Finished,
}

impl MatchStatus {
    /// Returns `true` if the match should appear in the room directory.
    pub fn is_listed(self) -> bool {
        matches!(self, Self::Waiting | Self::Playing)
    }
}

/// The recorded result of a finished match.
///
/// Persists as `"X"`, `"O"`, or `"draw"` in the `winner` field. Present
/// if and only if `status` is [`MatchStatus::Finished`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl MatchResult {
    /// The winning mark, or `None` for a draw.
    pub fn winning_mark(self) -> Option<Mark> {
        match self {
            Self::X => Some(Mark::X),
            Self::O => Some(Mark::O),
            Self::Draw => None,
        }
    }
}

impl From<Outcome> for MatchResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => Self::X,
            Outcome::Win { mark: Mark::O, .. } => Self::O,
            Outcome::Draw => Self::Draw,
        }
    }
}

/// One online match, as persisted in the store.
///
/// Field names are camelCase on the wire; the schema predates this
/// crate and existing documents must keep deserializing.
///
/// Invariants (upheld by the writers in `velha-match`, not by this type):
/// - `guest_id` is `None` exactly while `status` is `Waiting`
/// - `current_turn` is always one of the two participants
/// - `winner` is `Some` if and only if `status` is `Finished`
/// - a set cell is only ever cleared by a full rematch reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDocument {
    pub id: MatchId,
    pub host_id: PlayerId,
    pub guest_id: Option<PlayerId>,
    pub board: Board,
    pub current_turn: PlayerId,
    pub host_symbol: Mark,
    pub guest_symbol: Mark,
    pub status: MatchStatus,
    pub winner: Option<MatchResult>,
    #[serde(default)]
    pub rematch_requested: Option<PlayerId>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: u64,
}

impl MatchDocument {
    /// A fresh waiting room: empty board, creator as host with `X`,
    /// first turn reserved for the creator.
    pub fn new(host_id: PlayerId) -> Self {
        Self {
            id: MatchId::generate(),
            host_id,
            guest_id: None,
            board: Board::empty(),
            current_turn: host_id,
            host_symbol: Mark::X,
            guest_symbol: Mark::O,
            status: MatchStatus::Waiting,
            winner: None,
            rematch_requested: None,
            messages: Vec::new(),
            created_at: now_millis(),
        }
    }

    /// Returns `true` if `player` is the host or the guest.
    pub fn is_participant(&self, player: PlayerId) -> bool {
        self.host_id == player || self.guest_id == Some(player)
    }

    /// The mark assigned to `player`, or `None` for non-participants.
    pub fn mark_of(&self, player: PlayerId) -> Option<Mark> {
        if self.host_id == player {
            Some(self.host_symbol)
        } else if self.guest_id == Some(player) {
            Some(self.guest_symbol)
        } else {
            None
        }
    }

    /// The participant holding `mark`. `None` when the seat is empty.
    pub fn player_of(&self, mark: Mark) -> Option<PlayerId> {
        if self.host_symbol == mark {
            Some(self.host_id)
        } else {
            self.guest_id
        }
    }

    /// The other participant, from `player`'s point of view.
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        if self.host_id == player {
            self.guest_id
        } else if self.guest_id == Some(player) {
            Some(self.host_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_a_waiting_room() {
        let host = PlayerId::generate();
        let doc = MatchDocument::new(host);
        assert_eq!(doc.status, MatchStatus::Waiting);
        assert_eq!(doc.guest_id, None);
        assert!(doc.board.is_clear());
        assert_eq!(doc.current_turn, host);
        assert_eq!(doc.host_symbol, Mark::X);
        assert_eq!(doc.guest_symbol, Mark::O);
        assert_eq!(doc.winner, None);
        assert!(doc.messages.is_empty());
    }

    #[test]
    fn test_document_wire_format_is_camel_case() {
        let doc = MatchDocument::new(PlayerId::generate());
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("hostId").is_some());
        assert!(json.get("guestId").is_some());
        assert!(json.get("currentTurn").is_some());
        assert!(json.get("hostSymbol").is_some());
        assert!(json.get("rematchRequested").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "waiting");
        assert_eq!(json["hostSymbol"], "X");
        assert_eq!(json["guestSymbol"], "O");
    }

    #[test]
    fn test_document_deserializes_without_optional_fields() {
        // Documents written before chat/rematch existed have neither
        // field; `#[serde(default)]` must cover them.
        let doc = MatchDocument::new(PlayerId::generate());
        let mut json = serde_json::to_value(&doc).unwrap();
        json.as_object_mut().unwrap().remove("rematchRequested");
        json.as_object_mut().unwrap().remove("messages");
        let back: MatchDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back.rematch_requested, None);
        assert!(back.messages.is_empty());
    }

    #[test]
    fn test_match_result_wire_strings() {
        assert_eq!(serde_json::to_string(&MatchResult::X).unwrap(), "\"X\"");
        assert_eq!(serde_json::to_string(&MatchResult::O).unwrap(), "\"O\"");
        assert_eq!(
            serde_json::to_string(&MatchResult::Draw).unwrap(),
            "\"draw\""
        );
    }

    #[test]
    fn test_participant_helpers() {
        let host = PlayerId::generate();
        let guest = PlayerId::generate();
        let stranger = PlayerId::generate();
        let mut doc = MatchDocument::new(host);
        doc.guest_id = Some(guest);

        assert!(doc.is_participant(host));
        assert!(doc.is_participant(guest));
        assert!(!doc.is_participant(stranger));

        assert_eq!(doc.mark_of(host), Some(Mark::X));
        assert_eq!(doc.mark_of(guest), Some(Mark::O));
        assert_eq!(doc.mark_of(stranger), None);

        assert_eq!(doc.player_of(Mark::X), Some(host));
        assert_eq!(doc.player_of(Mark::O), Some(guest));

        assert_eq!(doc.opponent_of(host), Some(guest));
        assert_eq!(doc.opponent_of(guest), Some(host));
        assert_eq!(doc.opponent_of(stranger), None);
    }

    #[test]
    fn test_empty_seat_has_no_player() {
        let doc = MatchDocument::new(PlayerId::generate());
        assert_eq!(doc.player_of(Mark::O), None);
        assert_eq!(doc.opponent_of(doc.host_id), None);
    }
}
