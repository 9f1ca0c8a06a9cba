//! Shared schema and board rules for Velha.
//!
//! This crate defines every type that ends up in the document store,
//! the structures both clients read and write when they play online,
//! plus the pure board evaluation used identically by every game mode.
//!
//! # Key types
//!
//! - [`Mark`], [`Board`], [`Outcome`]: the 3×3 grid and its rules
//! - [`MatchDocument`]: the shared record for one online match
//! - [`ChatMessage`]: one entry in a match's append-only chat log
//! - [`UserProfile`]: identity, display data, and ranking points
//!
//! Everything here is deliberately side-effect free. [`Board::evaluate`]
//! in particular is re-run by every subscriber on every snapshot, so it
//! must stay a pure function of the board.

mod board;
mod chat;
mod document;
mod ids;
mod mark;
mod profile;
mod time;

pub use board::{Board, Outcome, CELLS, WIN_LINES};
pub use chat::{ChatMessage, MAX_MESSAGE_LEN};
pub use document::{MatchDocument, MatchResult, MatchStatus};
pub use ids::{MatchId, PlayerId};
pub use mark::Mark;
pub use profile::UserProfile;
pub use time::now_millis;
