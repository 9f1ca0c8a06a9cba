//! Accounts, profiles and the leaderboard for Velha.
//!
//! Identity here is deliberately thin: the [`Accounts`] trait trades
//! credentials for a [`velha_model::UserProfile`], and from then on the
//! rest of the system only ever sees a `PlayerId`. Points live on the
//! profile and are written exclusively by match settlement.

#![allow(async_fn_in_trait)]

mod error;
mod geo;
mod ranking;
mod service;

pub use error::AccountError;
pub use geo::{lookup_country, FALLBACK_COUNTRY};
pub use ranking::{ranking, RankingScope, TOP_RANKING_LIMIT};
pub use service::{
    edit_profile, Accounts, MemoryAccounts, Registration, MIN_PASSWORD_LEN,
};
