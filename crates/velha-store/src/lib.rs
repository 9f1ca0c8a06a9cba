//! Document store abstraction for Velha.
//!
//! Provides the [`MatchStore`] and [`ProfileStore`] traits that abstract
//! over the hosted real-time document store, and [`MemoryStore`], an
//! in-process implementation used for development and tests.
//!
//! # Snapshot model
//!
//! Subscriptions are `tokio::sync::watch` channels: a subscriber always
//! observes the *latest* full snapshot of a document (or of the listed
//! collection), delivered in order, with intermediate writes possibly
//! coalesced. That is exactly the guarantee the hosted store gives, so
//! code written against `MemoryStore` behaves the same remotely.
//!
//! # Guarded writes
//!
//! [`MatchStore::update_match_if`] is a conditional update: the change
//! applies only when the document still satisfies a [`MatchExpect`]
//! guard, otherwise the call fails with [`StoreError::Conflict`] and the
//! document is untouched. The match protocol routes every contested
//! transition (join, settlement, rematch accept) through this primitive.

#![allow(async_fn_in_trait)]

mod change;
mod error;
mod memory;
mod store;

pub use change::{MatchChange, MatchExpect, RematchExpect};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{DocWatch, ListWatch, MatchStore, ProfileStore};
