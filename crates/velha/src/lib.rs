//! # Velha
//!
//! Tic-tac-toe with three modes (local hot-seat, a generative-model
//! bot, and online multiplayer) where online play synchronizes through
//! a real-time document store with no server-side game authority.
//!
//! This meta-crate re-exports the sub-crates behind one facade:
//!
//! - [`velha_model`]: board rules and the shared document schema
//! - [`velha_store`]: the document store traits and in-memory backend
//! - [`velha_match`]: rooms, match sessions, settlement, chat
//! - [`velha_game`]: the offline modes
//! - [`velha_account`]: accounts, profiles, ranking
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use velha::prelude::*;
//!
//! # async fn run() -> Result<(), VelhaError> {
//! let app = Velha::builder().build();
//! let ana = app.register(Registration {
//!     email: "ana@example.com".into(),
//!     password: "segredo".into(),
//!     name: "Ana".into(),
//!     age: 30,
//!     country: "Brasil".into(),
//! }).await?;
//!
//! let room = app.rooms().create(ana.uid).await?;
//! let mut session = app.enter_match(room, ana.uid).await?;
//! while let Some(view) = session.next().await? {
//!     if view.my_turn {
//!         session.submit_move(4).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod app;
mod error;

pub use app::{Velha, VelhaBuilder};
pub use error::VelhaError;

/// Initializes a global tracing subscriber from `RUST_LOG`, defaulting
/// to `info`. Call once at startup; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

pub mod prelude {
    pub use crate::{init_tracing, Velha, VelhaBuilder, VelhaError};
    pub use velha_account::{Accounts, RankingScope, Registration};
    pub use velha_game::{BotConfig, BotGame, LocalGame, MoveProvider};
    pub use velha_match::{
        MatchPhase, MatchSession, MatchView, RoomAction, RoomDirectory,
    };
    pub use velha_model::{
        Board, ChatMessage, Mark, MatchDocument, MatchId, MatchResult,
        MatchStatus, Outcome, PlayerId, UserProfile,
    };
    pub use velha_store::{MatchStore, MemoryStore, ProfileStore, StoreError};
}
