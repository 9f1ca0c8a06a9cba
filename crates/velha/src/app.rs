//! The `Velha` application facade.
//!
//! Ties the layers together the way a client binary would: one shared
//! document store, an account backend on top of it, the room directory,
//! and constructors for the offline modes. Everything stateful lives in
//! the store; the facade itself is cheap to share.

use std::sync::Arc;

use velha_account::{
    edit_profile, lookup_country, ranking, Accounts, MemoryAccounts, RankingScope,
    Registration,
};
use velha_game::{BotConfig, BotGame, LlmMoveProvider, LocalGame};
use velha_match::{MatchSession, RoomDirectory};
use velha_model::{MatchId, PlayerId, UserProfile};
use velha_store::{ListWatch, MemoryStore, ProfileStore};

use crate::VelhaError;

/// Builder for a [`Velha`] application.
pub struct VelhaBuilder {
    bot: Option<BotConfig>,
}

impl VelhaBuilder {
    pub fn new() -> Self {
        Self { bot: BotConfig::from_env() }
    }

    /// Overrides the bot configuration (otherwise read from the
    /// environment, and absent when no API key is set).
    pub fn bot_config(mut self, config: BotConfig) -> Self {
        self.bot = Some(config);
        self
    }

    pub fn build(self) -> Velha {
        let store = Arc::new(MemoryStore::new());
        let accounts = MemoryAccounts::new(Arc::clone(&store));
        let directory = RoomDirectory::new(Arc::clone(&store));
        tracing::info!(bot_configured = self.bot.is_some(), "velha application assembled");
        Velha {
            store,
            accounts,
            directory,
            http: reqwest::Client::new(),
            bot: self.bot,
        }
    }
}

impl Default for VelhaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The assembled application: accounts, rooms, matches and the offline
/// modes over one shared store.
pub struct Velha {
    store: Arc<MemoryStore>,
    accounts: MemoryAccounts<MemoryStore>,
    directory: RoomDirectory<MemoryStore>,
    http: reqwest::Client,
    bot: Option<BotConfig>,
}

impl Velha {
    pub fn builder() -> VelhaBuilder {
        VelhaBuilder::new()
    }

    // Accounts and profiles.

    pub async fn register(
        &self,
        reg: Registration,
    ) -> Result<UserProfile, VelhaError> {
        Ok(self.accounts.register(reg).await?)
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, VelhaError> {
        Ok(self.accounts.login(email, password).await?)
    }

    pub async fn profile(&self, id: PlayerId) -> Result<UserProfile, VelhaError> {
        Ok(self.store.get_profile(id).await?)
    }

    pub async fn edit_profile(
        &self,
        id: PlayerId,
        name: &str,
        age: u8,
        country: &str,
    ) -> Result<(), VelhaError> {
        Ok(edit_profile(&*self.store, id, name, age, country).await?)
    }

    pub async fn ranking(
        &self,
        scope: RankingScope,
    ) -> Result<Vec<UserProfile>, VelhaError> {
        Ok(ranking(&*self.store, scope).await?)
    }

    /// Best-effort country suggestion for the registration form.
    pub async fn suggest_country(&self) -> String {
        lookup_country(&self.http).await
    }

    // Online play.

    /// The room directory for listing, creating and joining matches.
    pub fn rooms(&self) -> &RoomDirectory<MemoryStore> {
        &self.directory
    }

    /// A live view of all listed rooms.
    pub async fn watch_rooms(&self) -> ListWatch {
        self.directory.watch().await
    }

    /// Opens a live session on a match the player participates in.
    pub async fn enter_match(
        &self,
        id: MatchId,
        me: PlayerId,
    ) -> Result<MatchSession<MemoryStore>, VelhaError> {
        Ok(MatchSession::open(Arc::clone(&self.store), id, me).await?)
    }

    // Offline play.

    /// A fresh hot-seat game.
    pub fn local_game(&self) -> LocalGame {
        LocalGame::new()
    }

    /// A fresh game against the bot, or `None` when no bot is
    /// configured.
    pub fn bot_game(&self) -> Option<BotGame<LlmMoveProvider>> {
        let config = self.bot.clone()?;
        Some(BotGame::new(LlmMoveProvider::new(config)))
    }
}
