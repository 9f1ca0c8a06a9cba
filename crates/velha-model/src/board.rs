//! The 3×3 board and its evaluation.

use serde::{Deserialize, Serialize};

use crate::Mark;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The eight winning triples, checked in this fixed order: three rows,
/// three columns, two diagonals. [`Board::evaluate`] returns the first
/// fully-matched triple, so the order is part of the observable result.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A terminal board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Some triple is fully occupied by `mark`; `line` holds its cell
    /// indices so the UI can highlight it.
    Win { mark: Mark, line: [usize; 3] },
    /// Every cell is filled and no triple matched.
    Draw,
}

/// The shared 3×3 grid. Cell `i` maps to row `i / 3`, column `i % 3`.
///
/// Serializes transparently as an array of nine `"X"` / `"O"` / `null`
/// entries, matching the persisted document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(pub [Option<Mark>; 9]);

impl Board {
    /// An all-empty board.
    pub fn empty() -> Self {
        Self([None; 9])
    }

    /// The mark in `cell`, if any. Out-of-range cells read as empty.
    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.0.get(cell).copied().flatten()
    }

    /// Places `mark` in `cell`. Legality (turn order, occupancy) is the
    /// caller's responsibility.
    pub fn set(&mut self, cell: usize, mark: Mark) {
        self.0[cell] = Some(mark);
    }

    /// Returns `true` if `cell` is a legal target: in range and empty.
    pub fn is_open(&self, cell: usize) -> bool {
        cell < CELLS && self.0[cell].is_none()
    }

    /// Indices of all empty cells, in board order.
    pub fn open_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&i| self.0[i].is_none()).collect()
    }

    /// Returns `true` if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.0.iter().all(|c| c.is_some())
    }

    /// Returns `true` if every cell is empty (a fresh or reset board).
    pub fn is_clear(&self) -> bool {
        self.0.iter().all(|c| c.is_none())
    }

    /// Evaluates the board: the first fully-matched win line in
    /// [`WIN_LINES`] order, else [`Outcome::Draw`] if the board is full,
    /// else `None` (game still in progress).
    ///
    /// Pure and deterministic: every subscriber re-runs this on every
    /// snapshot, and all of them must agree.
    pub fn evaluate(&self) -> Option<Outcome> {
        for line in WIN_LINES {
            let [a, b, c] = line;
            if let Some(mark) = self.0[a] {
                if self.0[b] == Some(mark) && self.0[c] == Some(mark) {
                    return Some(Outcome::Win { mark, line });
                }
            }
        }
        if self.is_full() {
            return Some(Outcome::Draw);
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
