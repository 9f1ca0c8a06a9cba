//! The points leaderboard.

use velha_model::UserProfile;
use velha_store::ProfileStore;

use crate::AccountError;

/// How many entries the short leaderboard shows.
pub const TOP_RANKING_LIMIT: usize = 10;

/// Which slice of the leaderboard to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingScope {
    /// The short list shown by default.
    Top,
    /// Every registered player.
    Full,
}

/// Fetches the leaderboard, points descending.
pub async fn ranking<S: ProfileStore>(
    store: &S,
    scope: RankingScope,
) -> Result<Vec<UserProfile>, AccountError> {
    let limit = match scope {
        RankingScope::Top => Some(TOP_RANKING_LIMIT),
        RankingScope::Full => None,
    };
    Ok(store.profiles_by_points(limit).await?)
}
