//! Offline game modes for Velha.
//!
//! Two modes share the board rules from `velha-model` but nothing with
//! the online stack: no store, no subscription, no points.
//!
//! - [`LocalGame`]: hot-seat, two humans alternating on one device
//! - [`BotGame`]: the human against a [`MoveProvider`], normally the
//!   hosted generative model with a random-legal-move fallback

#![allow(async_fn_in_trait)]

mod bot;
mod error;
mod local;

pub use bot::{
    random_open_cell, BotConfig, BotGame, LlmMoveProvider, MoveProvider,
    DEFAULT_THINKING_DELAY,
};
pub use error::GameError;
pub use local::LocalGame;
