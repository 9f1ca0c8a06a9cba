//! Settlement: the exactly-once point award on match completion.

use velha_model::{MatchDocument, MatchResult, MatchStatus, Outcome, PlayerId};
use velha_store::{MatchChange, MatchExpect, MatchStore, ProfileStore, StoreError};

use crate::MatchError;

/// Points awarded to the winner of a match.
pub const WIN_POINTS: i64 = 10;

/// Points awarded to the loser of a match (negative: a deduction).
pub const LOSS_POINTS: i64 = -2;

/// Attempts per point write after the settlement guard has landed.
const POINT_WRITE_ATTEMPTS: u32 = 3;

/// Attempts to settle a finished match: close the document and apply
/// the point deltas. Both clients race to call this; the conditional
/// `Playing → Finished` write picks exactly one winner of the race, and
/// only that client touches points.
///
/// Returns `true` if this client performed the settlement, `false` if
/// another client (or an earlier call) already had. Draws settle the
/// document but award nothing.
pub async fn settle<S>(
    store: &S,
    doc: &MatchDocument,
    outcome: Outcome,
) -> Result<bool, MatchError>
where
    S: MatchStore + ProfileStore,
{
    let result = MatchResult::from(outcome);
    let guard = MatchExpect {
        status: Some(MatchStatus::Playing),
        winner_unset: true,
        ..Default::default()
    };

    match store
        .update_match_if(doc.id, guard, MatchChange::Settle { winner: result })
        .await
    {
        Ok(()) => {}
        // Lost the race, or the room vanished while we were finishing:
        // either way settlement is no longer ours to do.
        Err(StoreError::Conflict(reason)) => {
            tracing::debug!(match_id = %doc.id, reason, "match already settled");
            return Ok(false);
        }
        Err(StoreError::MatchNotFound(_)) => return Ok(false),
        Err(e) => return Err(e.into()),
    }

    if let Some(mark) = result.winning_mark() {
        let winner = doc.player_of(mark).ok_or(MatchError::NoOpponent)?;
        let loser = doc
            .player_of(mark.other())
            .ok_or(MatchError::NoOpponent)?;
        award_points(store, winner, WIN_POINTS).await?;
        award_points(store, loser, LOSS_POINTS).await?;
        tracing::info!(
            match_id = %doc.id,
            %winner,
            %loser,
            "match settled with a winner"
        );
    } else {
        tracing::info!(match_id = %doc.id, "match settled as a draw");
    }

    Ok(true)
}

/// Applies one settlement delta, retrying transient store failures.
///
/// This runs after the guarded `Settle` write, whose guard now conflicts
/// for every later settler: no future snapshot re-triggers the award, so
/// a delta that fails every attempt here is lost until someone corrects
/// the profile by hand. Hence the error-level log before propagating.
async fn award_points<S: ProfileStore>(
    store: &S,
    player: PlayerId,
    delta: i64,
) -> Result<(), MatchError> {
    let mut attempt = 1;
    loop {
        match store.add_points(player, delta).await {
            Ok(()) => return Ok(()),
            Err(StoreError::Unavailable(reason))
                if attempt < POINT_WRITE_ATTEMPTS =>
            {
                tracing::warn!(
                    %player,
                    attempt,
                    reason = %reason,
                    "point write failed, retrying"
                );
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(
                    %player,
                    delta,
                    error = %e,
                    "point award lost after settlement, needs manual correction"
                );
                return Err(e.into());
            }
        }
    }
}
