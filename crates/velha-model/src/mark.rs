//! The two player marks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A player's mark on the board.
///
/// The host is always `X`, the guest always `O`, fixed for the lifetime
/// of a match. Serializes as `"X"` / `"O"`, the exact strings the
/// hosted store persists inside board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The opposing mark.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}
