//! The per-client match phase: an explicit tagged state derived from
//! snapshots.
//!
//! Every transition in an online match is driven by remote snapshot
//! content, never by local timers. [`derive`] maps one snapshot to a
//! phase; [`step`] compares against the previous phase to surface the
//! two transitions a client must react to: a rematch reset (clear
//! local flags, fresh game) and an unsettled terminal state (run
//! settlement). Both functions are pure, so a client that re-subscribes
//! mid-game reconstructs the correct phase from the first snapshot it
//! receives.

use velha_model::{MatchDocument, MatchResult, MatchStatus, PlayerId};

/// The lifecycle phase of a match, as seen by one client.
///
/// ```text
/// Waiting ──→ Playing ──→ Finished ──→ AwaitingRematch ──→ Playing …
///                │            │               │
///                └────────────┴───────────────┴──→ (document deleted)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// One seat still empty; the host is waiting for an opponent.
    Waiting,
    /// Both seats filled, no terminal board state yet.
    Playing,
    /// The board is terminal. `settled` mirrors the document: `true`
    /// once some client's settlement write has landed.
    Finished { result: MatchResult, settled: bool },
    /// Finished, and `by` has asked for a rematch; the other side must
    /// accept or decline.
    AwaitingRematch { by: PlayerId },
}

impl MatchPhase {
    /// Returns `true` once the game has a result (finished or in the
    /// rematch handshake).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished { .. } | Self::AwaitingRematch { .. })
    }
}

/// The outcome of feeding one snapshot through the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStep {
    /// The phase derived from the new snapshot.
    pub phase: MatchPhase,
    /// The match was terminal and has been reset for a rematch; local
    /// per-game flags (scoring guard, highlighted line) must be
    /// cleared.
    pub reset: bool,
    /// The board is terminal but no settlement write has landed yet;
    /// this client should race to settle.
    pub needs_settlement: bool,
}

/// Derives the phase from a single snapshot.
///
/// The result is recomputed from the raw board on every call; a
/// previously cached result is never trusted, because the board is the
/// one field both clients agree on unconditionally.
pub fn derive(doc: &MatchDocument) -> MatchPhase {
    if doc.status == MatchStatus::Waiting {
        return MatchPhase::Waiting;
    }

    // Prefer the recorded winner, fall back to local evaluation: a
    // terminal board whose settlement write hasn't landed yet is
    // already Finished from this client's point of view.
    let result = doc
        .winner
        .or_else(|| doc.board.evaluate().map(MatchResult::from));

    match result {
        Some(result) => match doc.rematch_requested {
            Some(by) => MatchPhase::AwaitingRematch { by },
            None => MatchPhase::Finished {
                result,
                settled: doc.status == MatchStatus::Finished,
            },
        },
        None => MatchPhase::Playing,
    }
}

/// Feeds one snapshot through the machine, comparing against the
/// previously derived phase (`None` on the first snapshot).
pub fn step(prev: Option<&MatchPhase>, doc: &MatchDocument) -> PhaseStep {
    let phase = derive(doc);
    let was_terminal = prev.is_some_and(MatchPhase::is_terminal);

    // A reset is only recognizable by comparing against the previous
    // phase: `evaluate` alone cannot distinguish "never finished" from
    // "finished, then explicitly reset".
    let reset = was_terminal
        && phase == MatchPhase::Playing
        && doc.winner.is_none()
        && doc.board.is_clear();

    let needs_settlement =
        matches!(phase, MatchPhase::Finished { settled: false, .. });

    PhaseStep { phase, reset, needs_settlement }
}
