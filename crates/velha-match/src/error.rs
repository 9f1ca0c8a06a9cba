//! Error types for the match layer.

use velha_model::{MatchId, PlayerId, MAX_MESSAGE_LEN};
use velha_store::StoreError;

/// Errors that can occur during match operations.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A store operation failed (not found, conflict, unavailable).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The match document no longer exists; the caller should return
    /// to the room directory.
    #[error("match {0} no longer exists")]
    Gone(MatchId),

    /// The player is neither host nor guest of this match.
    #[error("player {0} is not a participant of match {1}")]
    NotParticipant(PlayerId, MatchId),

    /// A host tried to join their own waiting room as guest.
    #[error("cannot join your own room")]
    OwnRoom,

    /// Move target outside the 3×3 grid.
    #[error("cell {0} is out of range")]
    InvalidCell(usize),

    /// Move target already holds a mark.
    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    /// It is the opponent's turn.
    #[error("not your turn")]
    NotYourTurn,

    /// The match already has a recorded or derived result.
    #[error("the game is already over")]
    GameOver,

    /// A post-game action (rematch) was attempted on a live game.
    #[error("the game is not over yet")]
    NotFinished,

    /// No second participant has joined yet.
    #[error("no opponent has joined yet")]
    NoOpponent,

    /// Rematch accept/decline with no pending request from the
    /// opponent.
    #[error("no rematch request from the opponent")]
    NoRematchRequest,

    /// Chat message was empty after trimming.
    #[error("chat message is empty")]
    EmptyMessage,

    /// Chat message exceeds the length cap.
    #[error("chat message exceeds {MAX_MESSAGE_LEN} characters")]
    MessageTooLong,
}
