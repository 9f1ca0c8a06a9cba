//! Error types for accounts and profiles.

use velha_store::StoreError;

/// Errors that can occur during account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Registration with an email that already has an account.
    #[error("an account already exists for {0}")]
    EmailTaken(String),

    /// Login with an unknown email or a wrong password. Deliberately
    /// one variant: a caller cannot tell which half failed.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password below the minimum length.
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    /// Display name was empty after trimming.
    #[error("player name is empty")]
    EmptyName,

    /// Age outside the accepted range.
    #[error("age must be at least 1")]
    InvalidAge,
}
