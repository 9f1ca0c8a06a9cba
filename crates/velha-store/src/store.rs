//! The store traits: the primitives the rest of the system is written
//! against.
//!
//! The match protocol needs exactly these operations from its backing
//! store (create, read, field update, guarded update, atomic list
//! append, delete, single-document subscribe, filtered-collection
//! subscribe) plus atomic numeric increments on profiles for
//! settlement. Anything that can supply them (the hosted store, or
//! [`MemoryStore`](crate::MemoryStore) in tests) can back the game.

use tokio::sync::watch;

use velha_model::{ChatMessage, MatchDocument, MatchId, PlayerId, UserProfile};

use crate::{MatchChange, MatchExpect, StoreError};

/// A live subscription to one match document.
///
/// Yields the latest snapshot on every change; `None` means the
/// document has been deleted. Snapshots are delivered in order but
/// rapid intermediate writes may be coalesced.
pub type DocWatch = watch::Receiver<Option<MatchDocument>>;

/// A live subscription to the listed matches (status waiting or
/// playing), ordered by creation time.
pub type ListWatch = watch::Receiver<Vec<MatchDocument>>;

/// Match-document operations.
pub trait MatchStore: Send + Sync + 'static {
    /// Inserts a new match document. Fails if the id already exists.
    async fn create_match(&self, doc: MatchDocument) -> Result<MatchId, StoreError>;

    /// Reads the current snapshot of a match.
    async fn get_match(&self, id: MatchId) -> Result<MatchDocument, StoreError>;

    /// Applies an unconditional field update (last write wins).
    async fn update_match(
        &self,
        id: MatchId,
        change: MatchChange,
    ) -> Result<(), StoreError>;

    /// Applies `change` only if `expect` still holds against the stored
    /// document; otherwise fails with [`StoreError::Conflict`] and
    /// leaves the document untouched. Check-and-apply is atomic.
    async fn update_match_if(
        &self,
        id: MatchId,
        expect: MatchExpect,
        change: MatchChange,
    ) -> Result<(), StoreError>;

    /// Atomically appends one entry to the match's chat log. Never
    /// rewrites the log, so concurrent sends from both participants
    /// both land.
    async fn append_message(
        &self,
        id: MatchId,
        message: ChatMessage,
    ) -> Result<(), StoreError>;

    /// Deletes the match document. Subscribers observe `None`.
    async fn delete_match(&self, id: MatchId) -> Result<(), StoreError>;

    /// Opens a live subscription to one match document.
    async fn watch_match(&self, id: MatchId) -> Result<DocWatch, StoreError>;

    /// Opens a live subscription to all listed matches (the room
    /// directory view).
    async fn watch_listed(&self) -> ListWatch;
}

/// Profile-record operations.
pub trait ProfileStore: Send + Sync + 'static {
    /// Inserts a new profile. Fails if one already exists for the id.
    async fn create_profile(&self, profile: UserProfile) -> Result<(), StoreError>;

    /// Reads a profile.
    async fn get_profile(&self, id: PlayerId) -> Result<UserProfile, StoreError>;

    /// Updates the editable display fields, leaving points untouched.
    async fn update_profile(
        &self,
        id: PlayerId,
        name: String,
        age: u8,
        country: String,
    ) -> Result<(), StoreError>;

    /// Atomically adds a signed delta to a profile's points. This is
    /// the only way settlement ever touches points: a relative
    /// increment, never an absolute write, so concurrent awards against
    /// different matches compose.
    async fn add_points(&self, id: PlayerId, delta: i64) -> Result<(), StoreError>;

    /// All profiles ordered by points descending, optionally truncated
    /// to the top `limit`.
    async fn profiles_by_points(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<UserProfile>, StoreError>;
}
