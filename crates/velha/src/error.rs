//! Unified error type for the Velha crates.

use velha_account::AccountError;
use velha_game::GameError;
use velha_match::MatchError;
use velha_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `velha` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum VelhaError {
    /// A document store error (not found, conflict, unavailable).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An online match error (illegal move, rematch state, gone room).
    #[error(transparent)]
    Match(#[from] MatchError),

    /// An offline game error (local or bot mode).
    #[error(transparent)]
    Game(#[from] GameError),

    /// An account error (registration, login, profile).
    #[error(transparent)]
    Account(#[from] AccountError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use velha_model::MatchId;

    #[test]
    fn test_from_store_error() {
        let id = MatchId::generate();
        let err = StoreError::MatchNotFound(id);
        let velha_err: VelhaError = err.into();
        assert!(matches!(velha_err, VelhaError::Store(_)));
        assert!(velha_err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_from_match_error() {
        let err = MatchError::NotYourTurn;
        let velha_err: VelhaError = err.into();
        assert!(matches!(velha_err, VelhaError::Match(_)));
    }

    #[test]
    fn test_from_game_error() {
        let err = GameError::CellOccupied(4);
        let velha_err: VelhaError = err.into();
        assert!(matches!(velha_err, VelhaError::Game(_)));
        assert!(velha_err.to_string().contains('4'));
    }

    #[test]
    fn test_from_account_error() {
        let err = AccountError::InvalidCredentials;
        let velha_err: VelhaError = err.into();
        assert!(matches!(velha_err, VelhaError::Account(_)));
    }
}
