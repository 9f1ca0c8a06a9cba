//! Error types for the offline game modes.

/// Errors that can occur during a local or bot game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Move target outside the 3×3 grid.
    #[error("cell {0} is out of range")]
    InvalidCell(usize),

    /// Move target already holds a mark.
    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    /// The game already has an outcome; reset to play again.
    #[error("the game is already over")]
    GameOver,

    /// It is the other side's turn (the bot's, during its delay).
    #[error("not your turn")]
    NotYourTurn,

    /// The generative move provider failed or answered nonsense. The
    /// bot game never surfaces this to the player; it falls back to a
    /// random legal move instead.
    #[error("move provider failed: {0}")]
    Provider(String),
}
