//! Error types for the store layer.

use velha_model::{MatchId, PlayerId};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The match document does not exist (never created, or deleted).
    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    /// No profile record exists for the player.
    #[error("profile for player {0} not found")]
    ProfileNotFound(PlayerId),

    /// A profile record already exists for the player.
    #[error("profile for player {0} already exists")]
    ProfileExists(PlayerId),

    /// A guarded update found the document in a different state than
    /// expected. The write was not applied; the caller should refresh
    /// from the next snapshot.
    #[error("conditional update failed: {0}")]
    Conflict(&'static str),

    /// The backing store could not be reached. Transient; callers may
    /// re-issue the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
