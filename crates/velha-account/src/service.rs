//! Registration, login and profile editing.
//!
//! `Accounts` is the seam for the hosted identity provider;
//! `MemoryAccounts` backs development and tests. Either way the
//! resulting identity is a plain `PlayerId` and the profile lives in
//! the shared `ProfileStore`, where settlement adjusts its points.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use velha_model::{PlayerId, UserProfile};
use velha_store::ProfileStore;

use crate::AccountError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Everything needed to create an account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: u8,
    pub country: String,
}

/// Identity provider seam: exchanges credentials for a profile.
pub trait Accounts {
    async fn register(&self, reg: Registration) -> Result<UserProfile, AccountError>;
    async fn login(&self, email: &str, password: &str)
        -> Result<UserProfile, AccountError>;
}

/// Validates the editable profile fields shared by registration and
/// profile editing: a non-empty trimmed name and a plausible age.
fn validate_identity(name: &str, age: u8) -> Result<String, AccountError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AccountError::EmptyName);
    }
    if age == 0 {
        return Err(AccountError::InvalidAge);
    }
    Ok(name.to_string())
}

/// Updates the editable profile fields, leaving points untouched.
pub async fn edit_profile<S: ProfileStore>(
    store: &S,
    id: PlayerId,
    name: &str,
    age: u8,
    country: &str,
) -> Result<(), AccountError> {
    let name = validate_identity(name, age)?;
    store.update_profile(id, name, age, country.trim().to_string()).await?;
    tracing::info!(player_id = %id, "profile updated");
    Ok(())
}

struct Credential {
    player: PlayerId,
    password: String,
}

/// In-process [`Accounts`] implementation, keyed by lowercased email.
///
/// Passwords are held in plain text; this backend exists for
/// development and tests only, the hosted provider keeps the real
/// credentials.
pub struct MemoryAccounts<S> {
    store: Arc<S>,
    credentials: Mutex<HashMap<String, Credential>>,
}

impl<S: ProfileStore> MemoryAccounts<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store, credentials: Mutex::new(HashMap::new()) }
    }
}

impl<S: ProfileStore> Accounts for MemoryAccounts<S> {
    async fn register(&self, reg: Registration) -> Result<UserProfile, AccountError> {
        if reg.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        let name = validate_identity(&reg.name, reg.age)?;
        let email = reg.email.trim().to_lowercase();

        let mut credentials = self.credentials.lock().await;
        if credentials.contains_key(&email) {
            return Err(AccountError::EmailTaken(email));
        }

        let player = PlayerId::generate();
        let profile = UserProfile::new(player, &name, reg.age, reg.country.trim());
        self.store.create_profile(profile.clone()).await?;
        credentials
            .insert(email, Credential { player, password: reg.password });
        tracing::info!(player_id = %player, "account registered");
        Ok(profile)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AccountError> {
        let email = email.trim().to_lowercase();
        let credentials = self.credentials.lock().await;
        let cred = credentials
            .get(&email)
            .ok_or(AccountError::InvalidCredentials)?;
        if cred.password != password {
            return Err(AccountError::InvalidCredentials);
        }
        let profile = self.store.get_profile(cred.player).await?;
        tracing::info!(player_id = %profile.uid, "login succeeded");
        Ok(profile)
    }
}
