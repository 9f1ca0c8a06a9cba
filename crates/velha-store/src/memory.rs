//! In-process store implementation.
//!
//! `MemoryStore` backs development and tests with the same observable
//! semantics as the hosted store: whole-document snapshots, last write
//! wins, watch channels that coalesce rapid updates to the latest
//! value. All state lives under one async mutex; every operation is a
//! short critical section.

use std::collections::HashMap;

use tokio::sync::{watch, Mutex};

use velha_model::{ChatMessage, MatchDocument, MatchId, PlayerId, UserProfile};

use crate::{
    DocWatch, ListWatch, MatchChange, MatchExpect, MatchStore, ProfileStore,
    StoreError,
};

struct Inner {
    matches: HashMap<MatchId, MatchDocument>,
    watchers: HashMap<MatchId, watch::Sender<Option<MatchDocument>>>,
    listed: watch::Sender<Vec<MatchDocument>>,
    profiles: HashMap<PlayerId, UserProfile>,
}

impl Inner {
    /// Pushes the current snapshot of `id` to its watchers and
    /// refreshes the directory view. Call after every match mutation.
    fn publish(&mut self, id: MatchId) {
        if let Some(doc) = self.matches.get(&id) {
            if let Some(tx) = self.watchers.get(&id) {
                tx.send_replace(Some(doc.clone()));
            }
        }
        self.refresh_listed();
    }

    fn refresh_listed(&mut self) {
        let mut listed: Vec<MatchDocument> = self
            .matches
            .values()
            .filter(|doc| doc.status.is_listed())
            .cloned()
            .collect();
        listed.sort_by_key(|doc| doc.created_at);
        self.listed.send_replace(listed);
    }
}

/// An in-memory [`MatchStore`] + [`ProfileStore`].
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        let (listed, _) = watch::channel(Vec::new());
        Self {
            inner: Mutex::new(Inner {
                matches: HashMap::new(),
                watchers: HashMap::new(),
                listed,
                profiles: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStore for MemoryStore {
    async fn create_match(&self, doc: MatchDocument) -> Result<MatchId, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = doc.id;
        if inner.matches.contains_key(&id) {
            return Err(StoreError::Conflict("match id already exists"));
        }
        inner.matches.insert(id, doc);
        inner.publish(id);
        tracing::info!(match_id = %id, "match document created");
        Ok(id)
    }

    async fn get_match(&self, id: MatchId) -> Result<MatchDocument, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .matches
            .get(&id)
            .cloned()
            .ok_or(StoreError::MatchNotFound(id))
    }

    async fn update_match(
        &self,
        id: MatchId,
        change: MatchChange,
    ) -> Result<(), StoreError> {
        self.update_match_if(id, MatchExpect::default(), change).await
    }

    async fn update_match_if(
        &self,
        id: MatchId,
        expect: MatchExpect,
        change: MatchChange,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let doc = inner
            .matches
            .get_mut(&id)
            .ok_or(StoreError::MatchNotFound(id))?;

        if let Err(reason) = expect.check(doc) {
            tracing::debug!(match_id = %id, reason, "guarded update rejected");
            return Err(StoreError::Conflict(reason));
        }

        change.apply(doc);
        inner.publish(id);
        Ok(())
    }

    async fn append_message(
        &self,
        id: MatchId,
        message: ChatMessage,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let doc = inner
            .matches
            .get_mut(&id)
            .ok_or(StoreError::MatchNotFound(id))?;
        doc.messages.push(message);
        inner.publish(id);
        Ok(())
    }

    async fn delete_match(&self, id: MatchId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.matches.remove(&id).is_none() {
            return Err(StoreError::MatchNotFound(id));
        }
        // Tell subscribers the document is gone, then drop the channel.
        if let Some(tx) = inner.watchers.remove(&id) {
            tx.send_replace(None);
        }
        inner.refresh_listed();
        tracing::info!(match_id = %id, "match document deleted");
        Ok(())
    }

    async fn watch_match(&self, id: MatchId) -> Result<DocWatch, StoreError> {
        let mut inner = self.inner.lock().await;
        let doc = inner
            .matches
            .get(&id)
            .cloned()
            .ok_or(StoreError::MatchNotFound(id))?;
        let tx = inner
            .watchers
            .entry(id)
            .or_insert_with(|| watch::channel(Some(doc)).0);
        Ok(tx.subscribe())
    }

    async fn watch_listed(&self) -> ListWatch {
        let inner = self.inner.lock().await;
        inner.listed.subscribe()
    }
}

impl ProfileStore for MemoryStore {
    async fn create_profile(&self, profile: UserProfile) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.profiles.contains_key(&profile.uid) {
            return Err(StoreError::ProfileExists(profile.uid));
        }
        tracing::info!(player_id = %profile.uid, "profile created");
        inner.profiles.insert(profile.uid, profile);
        Ok(())
    }

    async fn get_profile(&self, id: PlayerId) -> Result<UserProfile, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .profiles
            .get(&id)
            .cloned()
            .ok_or(StoreError::ProfileNotFound(id))
    }

    async fn update_profile(
        &self,
        id: PlayerId,
        name: String,
        age: u8,
        country: String,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let profile = inner
            .profiles
            .get_mut(&id)
            .ok_or(StoreError::ProfileNotFound(id))?;
        profile.name = name;
        profile.age = age;
        profile.country = country;
        Ok(())
    }

    async fn add_points(&self, id: PlayerId, delta: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let profile = inner
            .profiles
            .get_mut(&id)
            .ok_or(StoreError::ProfileNotFound(id))?;
        profile.points += delta;
        tracing::debug!(player_id = %id, delta, points = profile.points, "points adjusted");
        Ok(())
    }

    async fn profiles_by_points(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<UserProfile>, StoreError> {
        let inner = self.inner.lock().await;
        let mut all: Vec<UserProfile> = inner.profiles.values().cloned().collect();
        all.sort_by(|a, b| b.points.cmp(&a.points));
        if let Some(limit) = limit {
            all.truncate(limit);
        }
        Ok(all)
    }
}
