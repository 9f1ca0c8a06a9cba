//! Typed match-document updates and conditional-write guards.
//!
//! The hosted store updates documents by field map; the typed
//! equivalents here enumerate exactly the field sets the protocol ever
//! writes together, so an impossible partial write (say, a new board
//! without a turn flip) cannot be expressed.

use velha_model::{Board, MatchDocument, MatchResult, MatchStatus, PlayerId};

/// A single atomic update to a match document.
///
/// Each variant corresponds to one protocol write and touches only its
/// own fields; everything else in the document is left as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchChange {
    /// A guest takes the empty seat: sets `guest_id`, flips the status
    /// to `Playing`.
    Seat { guest_id: PlayerId },

    /// An accepted move: the full updated board plus the turn handed to
    /// the other participant, written together.
    Play { board: Board, current_turn: PlayerId },

    /// Settlement: records the result and closes the match.
    Settle { winner: MatchResult },

    /// A participant asks for a rematch.
    RematchRequest { by: PlayerId },

    /// The responder accepts: board cleared, result erased, request
    /// cleared, turn returned to the host, match back in play.
    RematchReset,
}

impl MatchChange {
    /// Applies this change to a document in place. Pure with respect to
    /// everything but `doc`.
    pub fn apply(&self, doc: &mut MatchDocument) {
        match self {
            Self::Seat { guest_id } => {
                doc.guest_id = Some(*guest_id);
                doc.status = MatchStatus::Playing;
            }
            Self::Play { board, current_turn } => {
                doc.board = *board;
                doc.current_turn = *current_turn;
            }
            Self::Settle { winner } => {
                doc.status = MatchStatus::Finished;
                doc.winner = Some(*winner);
            }
            Self::RematchRequest { by } => {
                doc.rematch_requested = Some(*by);
            }
            Self::RematchReset => {
                doc.board = Board::empty();
                doc.current_turn = doc.host_id;
                doc.winner = None;
                doc.status = MatchStatus::Playing;
                doc.rematch_requested = None;
            }
        }
    }
}

/// Expected rematch-request state in a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RematchExpect {
    /// No request pending.
    Unset,
    /// A pending request from this participant.
    By(PlayerId),
}

/// The guard side of a conditional write: every populated field must
/// still hold on the stored document, or the write is rejected.
///
/// An empty guard (`MatchExpect::default()`) accepts any state, which
/// degenerates to a plain last-write-wins update.
#[derive(Debug, Clone, Default)]
pub struct MatchExpect {
    /// Document status must equal this.
    pub status: Option<MatchStatus>,
    /// The guest seat must still be empty.
    pub guest_vacant: bool,
    /// No winner may be recorded yet.
    pub winner_unset: bool,
    /// It must be this participant's turn.
    pub turn_of: Option<PlayerId>,
    /// This cell must still be empty.
    pub cell_open: Option<usize>,
    /// The rematch field must be in this state.
    pub rematch: Option<RematchExpect>,
}

impl MatchExpect {
    /// Checks the guard against a document. Returns the first violated
    /// condition as a static description (used in conflict errors and
    /// logs).
    pub fn check(&self, doc: &MatchDocument) -> Result<(), &'static str> {
        if let Some(status) = self.status {
            if doc.status != status {
                return Err("status changed");
            }
        }
        if self.guest_vacant && doc.guest_id.is_some() {
            return Err("seat already taken");
        }
        if self.winner_unset && doc.winner.is_some() {
            return Err("winner already recorded");
        }
        if let Some(player) = self.turn_of {
            if doc.current_turn != player {
                return Err("not this player's turn");
            }
        }
        if let Some(cell) = self.cell_open {
            if !doc.board.is_open(cell) {
                return Err("cell no longer open");
            }
        }
        match self.rematch {
            Some(RematchExpect::Unset) if doc.rematch_requested.is_some() => {
                return Err("rematch already requested");
            }
            Some(RematchExpect::By(player))
                if doc.rematch_requested != Some(player) =>
            {
                return Err("rematch request changed");
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velha_model::Mark;

    fn playing_doc() -> MatchDocument {
        let mut doc = MatchDocument::new(PlayerId::generate());
        MatchChange::Seat { guest_id: PlayerId::generate() }.apply(&mut doc);
        doc
    }

    #[test]
    fn test_seat_sets_guest_and_status() {
        let mut doc = MatchDocument::new(PlayerId::generate());
        let guest = PlayerId::generate();
        MatchChange::Seat { guest_id: guest }.apply(&mut doc);
        assert_eq!(doc.guest_id, Some(guest));
        assert_eq!(doc.status, MatchStatus::Playing);
    }

    #[test]
    fn test_play_replaces_board_and_turn() {
        let mut doc = playing_doc();
        let guest = doc.guest_id.unwrap();
        let mut board = doc.board;
        board.set(4, Mark::X);
        MatchChange::Play { board, current_turn: guest }.apply(&mut doc);
        assert_eq!(doc.board.get(4), Some(Mark::X));
        assert_eq!(doc.current_turn, guest);
    }

    #[test]
    fn test_settle_records_winner_and_finishes() {
        let mut doc = playing_doc();
        MatchChange::Settle { winner: MatchResult::X }.apply(&mut doc);
        assert_eq!(doc.status, MatchStatus::Finished);
        assert_eq!(doc.winner, Some(MatchResult::X));
    }

    #[test]
    fn test_rematch_reset_restores_fresh_game() {
        let mut doc = playing_doc();
        let guest = doc.guest_id.unwrap();
        doc.board.set(0, Mark::X);
        MatchChange::Settle { winner: MatchResult::X }.apply(&mut doc);
        MatchChange::RematchRequest { by: guest }.apply(&mut doc);

        MatchChange::RematchReset.apply(&mut doc);
        assert!(doc.board.is_clear());
        assert_eq!(doc.current_turn, doc.host_id);
        assert_eq!(doc.winner, None);
        assert_eq!(doc.status, MatchStatus::Playing);
        assert_eq!(doc.rematch_requested, None);
        // Seats survive the reset.
        assert_eq!(doc.guest_id, Some(guest));
    }

    #[test]
    fn test_empty_guard_accepts_anything() {
        let doc = playing_doc();
        assert!(MatchExpect::default().check(&doc).is_ok());
    }

    #[test]
    fn test_guard_rejects_taken_seat() {
        let doc = playing_doc();
        let guard = MatchExpect { guest_vacant: true, ..Default::default() };
        assert_eq!(guard.check(&doc), Err("seat already taken"));
    }

    #[test]
    fn test_guard_rejects_wrong_status() {
        let doc = playing_doc();
        let guard = MatchExpect {
            status: Some(MatchStatus::Waiting),
            ..Default::default()
        };
        assert_eq!(guard.check(&doc), Err("status changed"));
    }

    #[test]
    fn test_guard_rejects_wrong_turn_and_closed_cell() {
        let mut doc = playing_doc();
        let guest = doc.guest_id.unwrap();
        doc.board.set(4, Mark::X);

        let guard = MatchExpect { turn_of: Some(guest), ..Default::default() };
        assert_eq!(guard.check(&doc), Err("not this player's turn"));

        let guard = MatchExpect { cell_open: Some(4), ..Default::default() };
        assert_eq!(guard.check(&doc), Err("cell no longer open"));
        let guard = MatchExpect { cell_open: Some(5), ..Default::default() };
        assert!(guard.check(&doc).is_ok());
    }

    #[test]
    fn test_guard_rematch_states() {
        let mut doc = playing_doc();
        let host = doc.host_id;
        let guest = doc.guest_id.unwrap();

        let unset = MatchExpect {
            rematch: Some(RematchExpect::Unset),
            ..Default::default()
        };
        assert!(unset.check(&doc).is_ok());

        MatchChange::RematchRequest { by: guest }.apply(&mut doc);
        assert_eq!(unset.check(&doc), Err("rematch already requested"));

        let by_guest = MatchExpect {
            rematch: Some(RematchExpect::By(guest)),
            ..Default::default()
        };
        assert!(by_guest.check(&doc).is_ok());

        let by_host = MatchExpect {
            rematch: Some(RematchExpect::By(host)),
            ..Default::default()
        };
        assert_eq!(by_host.check(&doc), Err("rematch request changed"));
    }
}
