//! The room directory: the set of matches a player may join or resume.

use std::sync::Arc;

use velha_model::{MatchDocument, MatchId, MatchStatus, PlayerId};
use velha_store::{ListWatch, MatchChange, MatchExpect, MatchStore};

use crate::MatchError;

/// How one directory row renders for a given viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomAction {
    /// Someone else's waiting room; the viewer may take the seat.
    Join,
    /// A match the viewer participates in that is underway; re-enter.
    Resume,
    /// The viewer's own waiting room; may be cancelled.
    Cancel,
    /// Nothing the viewer can do with this row.
    Unavailable,
}

impl RoomAction {
    /// Classifies a listed match for `viewer`. The directory itself is
    /// unfiltered; this distinction exists only on the client.
    pub fn for_viewer(doc: &MatchDocument, viewer: PlayerId) -> Self {
        match (doc.status, doc.is_participant(viewer)) {
            (MatchStatus::Waiting, true) => Self::Cancel,
            (MatchStatus::Waiting, false) => Self::Join,
            (MatchStatus::Playing, true) => Self::Resume,
            _ => Self::Unavailable,
        }
    }
}

/// Creates, lists, joins and deletes match documents.
///
/// Cheap to clone; all state lives in the store.
pub struct RoomDirectory<S> {
    store: Arc<S>,
}

impl<S> Clone for RoomDirectory<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: MatchStore> RoomDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Opens a live view of all listed matches (waiting or playing).
    pub async fn watch(&self) -> ListWatch {
        self.store.watch_listed().await
    }

    /// Creates a fresh waiting room hosted by `creator` and returns its
    /// id. The caller is expected to enter the match immediately.
    pub async fn create(&self, creator: PlayerId) -> Result<MatchId, MatchError> {
        let doc = MatchDocument::new(creator);
        let id = self.store.create_match(doc).await?;
        tracing::info!(match_id = %id, host = %creator, "room created");
        Ok(id)
    }

    /// Takes the guest seat of a waiting room.
    ///
    /// Guarded: the write only succeeds while the room is still waiting
    /// with an empty seat, so two players racing for the same room
    /// cannot both win it. The loser gets a conflict and stays in the
    /// directory.
    pub async fn join(
        &self,
        id: MatchId,
        player: PlayerId,
    ) -> Result<(), MatchError> {
        let doc = self.store.get_match(id).await?;
        if doc.host_id == player {
            return Err(MatchError::OwnRoom);
        }

        let guard = MatchExpect {
            status: Some(MatchStatus::Waiting),
            guest_vacant: true,
            ..Default::default()
        };
        self.store
            .update_match_if(id, guard, MatchChange::Seat { guest_id: player })
            .await?;
        tracing::info!(match_id = %id, guest = %player, "room joined");
        Ok(())
    }

    /// Deletes a waiting room. Only its host may cancel it; everyone
    /// else goes through a session's leave/decline paths.
    pub async fn cancel(
        &self,
        id: MatchId,
        by: PlayerId,
    ) -> Result<(), MatchError> {
        let doc = self.store.get_match(id).await?;
        if doc.host_id != by {
            return Err(MatchError::NotParticipant(by, id));
        }
        self.store.delete_match(id).await?;
        tracing::info!(match_id = %id, "room cancelled by host");
        Ok(())
    }
}
