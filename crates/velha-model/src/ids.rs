//! Identity newtypes.
//!
//! Both ids wrap a v7 UUID so they sort by creation time and can be
//! generated client-side without coordination (the store never hands
//! out ids of its own).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a player (one account, one id).
///
/// Newtype wrapper so a `PlayerId` can never be passed where a
/// [`MatchId`] is expected. `#[serde(transparent)]` keeps the wire
/// form a plain UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generates a fresh player id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a match document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub Uuid);

impl MatchId {
    /// Generates a fresh match id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Short, human-friendly room code: the last six characters of the
    /// id, uppercased. Shown in room lists and the waiting screen.
    pub fn short_code(&self) -> String {
        let s = self.0.simple().to_string();
        s[s.len() - 6..].to_uppercase()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
