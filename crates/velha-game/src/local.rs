//! Hot-seat play: two players alternating on one device.
//!
//! The whole mode is this struct. It owns a board, tracks whose turn it
//! is, and stops accepting moves once [`Board::evaluate`] reports an
//! outcome. Nothing is persisted and no points are awarded.

use velha_model::{Board, Mark, Outcome, CELLS};

use crate::GameError;

/// A single offline game. X always opens.
#[derive(Debug, Clone)]
pub struct LocalGame {
    board: Board,
    current: Mark,
    outcome: Option<Outcome>,
}

impl LocalGame {
    pub fn new() -> Self {
        Self { board: Board::empty(), current: Mark::X, outcome: None }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The mark to move next. Meaningless once the game is over.
    pub fn current_player(&self) -> Mark {
        self.current
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The highlighted cells of the winning triple, if the game ended
    /// in a win.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.outcome {
            Some(Outcome::Win { line, .. }) => Some(line),
            _ => None,
        }
    }

    /// Plays the current player's mark into `cell` and advances the
    /// turn. Returns the outcome if this move ended the game.
    pub fn play(&mut self, cell: usize) -> Result<Option<Outcome>, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if cell >= CELLS {
            return Err(GameError::InvalidCell(cell));
        }
        if !self.board.is_open(cell) {
            return Err(GameError::CellOccupied(cell));
        }

        self.board.set(cell, self.current);
        self.outcome = self.board.evaluate();
        if self.outcome.is_none() {
            self.current = self.current.other();
        }
        Ok(self.outcome)
    }

    /// Starts over: empty board, X to move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for LocalGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_opens_and_turns_alternate() {
        let mut game = LocalGame::new();
        assert_eq!(game.current_player(), Mark::X);
        game.play(4).unwrap();
        assert_eq!(game.current_player(), Mark::O);
        game.play(0).unwrap();
        assert_eq!(game.current_player(), Mark::X);
        assert_eq!(game.board().get(4), Some(Mark::X));
        assert_eq!(game.board().get(0), Some(Mark::O));
    }

    #[test]
    fn test_occupied_and_out_of_range_cells_are_rejected() {
        let mut game = LocalGame::new();
        game.play(4).unwrap();
        assert!(matches!(game.play(4), Err(GameError::CellOccupied(4))));
        assert!(matches!(game.play(9), Err(GameError::InvalidCell(9))));
        // A rejected move does not consume the turn.
        assert_eq!(game.current_player(), Mark::O);
    }

    #[test]
    fn test_win_ends_the_game() {
        let mut game = LocalGame::new();
        for cell in [0, 3, 1, 4] {
            game.play(cell).unwrap();
        }
        let outcome = game.play(2).unwrap();
        assert_eq!(
            outcome,
            Some(Outcome::Win { mark: Mark::X, line: [0, 1, 2] })
        );
        assert!(game.is_over());
        assert_eq!(game.winning_line(), Some([0, 1, 2]));
        assert!(matches!(game.play(5), Err(GameError::GameOver)));
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let mut game = LocalGame::new();
        // X: 0 2 3 7 8, O: 1 4 5 6.
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.play(cell).unwrap();
        }
        assert_eq!(game.outcome(), Some(Outcome::Draw));
        assert_eq!(game.winning_line(), None);
    }

    #[test]
    fn test_reset_starts_over() {
        let mut game = LocalGame::new();
        game.play(4).unwrap();
        game.reset();
        assert!(game.board().is_clear());
        assert_eq!(game.current_player(), Mark::X);
        assert!(!game.is_over());
    }
}
