//! Online multiplayer for Velha: the synchronization layer.
//!
//! Two clients agree on shared match state through nothing but a
//! real-time document store; there is no server-side authority. Each
//! client holds one live subscription per open match, re-derives all
//! game-relevant state from every full snapshot, and writes its own
//! actions back as guarded document updates.
//!
//! # Key types
//!
//! - [`RoomDirectory`]: list, create, join and cancel matches
//! - [`MatchSession`]: the per-client state machine for one match
//! - [`MatchPhase`]: explicit tagged phase derived from snapshots
//! - [`MatchView`]: one snapshot plus everything the UI derives from it
//!
//! # Field ownership
//!
//! The match document has no lock; correctness rests on each field
//! being written only by the side the protocol says may write it
//! (board/turn by the player to move, settlement by whichever client
//! wins the finish race, rematch fields by requester then responder).
//! Contested transitions (join, settlement, rematch accept) go
//! through the store's guarded conditional update so a lost race is a
//! visible conflict instead of a silent overwrite.

#![allow(async_fn_in_trait)]

mod chat;
mod directory;
mod error;
mod phase;
mod session;
mod settle;

pub use chat::prepare_message;
pub use directory::{RoomAction, RoomDirectory};
pub use error::MatchError;
pub use phase::{derive, step, MatchPhase, PhaseStep};
pub use session::{MatchSession, MatchView};
pub use settle::{LOSS_POINTS, WIN_POINTS};
