//! The per-client match session: one live subscription, one state
//! machine.
//!
//! A session is the only code path through which a client reads or
//! writes an active match. It mirrors the last-received snapshot,
//! re-derives everything the UI needs from each new snapshot in full
//! (there is no delta logic), and submits local actions as guarded
//! document updates whose effects come back through the subscription.
//! The session never optimistically mutates its mirror, except on the
//! rematch-accept path where the original protocol does both.

use std::sync::Arc;

use velha_model::{
    Mark, MatchDocument, MatchId, MatchStatus, PlayerId, CELLS,
};
use velha_store::{
    DocWatch, MatchChange, MatchExpect, MatchStore, ProfileStore, RematchExpect,
    StoreError,
};

use crate::{chat, phase, settle, MatchError, MatchPhase};

/// One snapshot plus everything a client derives from it locally:
/// phase, own mark, turn ownership, and the highlighted win line.
/// Derived fields are never transmitted; each client recomputes them.
#[derive(Debug, Clone)]
pub struct MatchView {
    pub doc: MatchDocument,
    pub phase: MatchPhase,
    pub my_mark: Option<Mark>,
    pub my_turn: bool,
    pub winning_line: Option<[usize; 3]>,
}

/// A live session on one match document, held by one participant.
pub struct MatchSession<S> {
    store: Arc<S>,
    match_id: MatchId,
    me: PlayerId,
    watch: DocWatch,
    doc: MatchDocument,
    phase: MatchPhase,
    /// Local settlement short-circuit. Not load-bearing: the guarded
    /// `Playing → Finished` write is what makes settlement
    /// exactly-once, so losing this flag on reconnect is harmless.
    settled: bool,
}

impl<S> MatchSession<S>
where
    S: MatchStore + ProfileStore,
{
    /// Opens a session: subscribes to the document and processes the
    /// initial snapshot (which may itself require settlement: a client
    /// resuming a match that finished while it was away settles on
    /// entry, and the guard makes that a no-op if the other side
    /// already has).
    pub async fn open(
        store: Arc<S>,
        match_id: MatchId,
        me: PlayerId,
    ) -> Result<Self, MatchError> {
        let mut watch = store.watch_match(match_id).await?;
        let doc = watch
            .borrow_and_update()
            .clone()
            .ok_or(MatchError::Gone(match_id))?;
        if !doc.is_participant(me) {
            return Err(MatchError::NotParticipant(me, match_id));
        }

        let mut session = Self {
            store,
            match_id,
            me,
            watch,
            phase: MatchPhase::Waiting,
            doc,
            settled: false,
        };
        let doc = session.doc.clone();
        session.apply_snapshot(doc, true).await?;
        tracing::info!(%match_id, player = %me, "match session opened");
        Ok(session)
    }

    /// The match this session is attached to.
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    /// The local participant.
    pub fn player_id(&self) -> PlayerId {
        self.me
    }

    /// The current derived view, from the last processed snapshot.
    pub fn view(&self) -> MatchView {
        let winning_line = match self.doc.board.evaluate() {
            Some(velha_model::Outcome::Win { line, .. }) => Some(line),
            _ => None,
        };
        MatchView {
            my_mark: self.doc.mark_of(self.me),
            my_turn: self.phase == MatchPhase::Playing
                && self.doc.current_turn == self.me,
            winning_line,
            phase: self.phase,
            doc: self.doc.clone(),
        }
    }

    /// Waits for the next snapshot and processes it.
    ///
    /// Returns the updated view, or `None` once the document has been
    /// deleted (opponent left, rematch declined, room cancelled); the
    /// caller should return to the room directory.
    pub async fn next(&mut self) -> Result<Option<MatchView>, MatchError> {
        if self.watch.changed().await.is_err() {
            return Ok(None);
        }
        let snapshot = self.watch.borrow_and_update().clone();
        let Some(doc) = snapshot else {
            tracing::info!(match_id = %self.match_id, "match document gone");
            return Ok(None);
        };
        self.apply_snapshot(doc, false).await?;
        Ok(Some(self.view()))
    }

    /// Processes one full snapshot: phase step, rematch-reset flag
    /// clearing, and the settlement race when the board just became
    /// terminal.
    async fn apply_snapshot(
        &mut self,
        doc: MatchDocument,
        first: bool,
    ) -> Result<(), MatchError> {
        let prev = (!first).then_some(&self.phase);
        let step = phase::step(prev, &doc);

        if step.reset {
            // The match was finished and some client accepted a
            // rematch: local per-game state starts over.
            self.settled = false;
            tracing::info!(match_id = %self.match_id, "rematch reset observed");
        }

        self.phase = step.phase;
        self.doc = doc;

        if step.needs_settlement && !self.settled {
            if let Some(outcome) = self.doc.board.evaluate() {
                let applied =
                    settle::settle(self.store.as_ref(), &self.doc, outcome)
                        .await?;
                // Either we settled or we lost the race to the other
                // client; both mean it is done.
                self.settled = true;
                if applied {
                    tracing::debug!(
                        match_id = %self.match_id,
                        player = %self.me,
                        "this client performed settlement"
                    );
                }
            }
        }
        Ok(())
    }

    /// Submits a move into `cell`.
    ///
    /// Validated against the latest local snapshot (own turn, cell
    /// open, no result yet) and then written with the same conditions
    /// as a store guard, so a move raced against a stale snapshot
    /// surfaces as a conflict instead of overwriting the opponent.
    /// The board and the turn flip are written in one atomic update.
    pub async fn submit_move(&self, cell: usize) -> Result<(), MatchError> {
        if cell >= CELLS {
            return Err(MatchError::InvalidCell(cell));
        }
        match self.phase {
            MatchPhase::Waiting => return Err(MatchError::NoOpponent),
            MatchPhase::Playing => {}
            _ => return Err(MatchError::GameOver),
        }
        if self.doc.current_turn != self.me {
            return Err(MatchError::NotYourTurn);
        }
        if !self.doc.board.is_open(cell) {
            return Err(MatchError::CellOccupied(cell));
        }
        let mark = self
            .doc
            .mark_of(self.me)
            .ok_or(MatchError::NotParticipant(self.me, self.match_id))?;
        let opponent = self.doc.opponent_of(self.me).ok_or(MatchError::NoOpponent)?;

        let mut board = self.doc.board;
        board.set(cell, mark);

        let guard = MatchExpect {
            status: Some(MatchStatus::Playing),
            winner_unset: true,
            turn_of: Some(self.me),
            cell_open: Some(cell),
            ..Default::default()
        };
        self.store
            .update_match_if(
                self.match_id,
                guard,
                MatchChange::Play { board, current_turn: opponent },
            )
            .await?;
        tracing::debug!(
            match_id = %self.match_id,
            player = %self.me,
            cell,
            %mark,
            "move submitted"
        );
        Ok(())
    }

    /// Asks the opponent for a rematch after a finished game. The
    /// requester then waits; the next action belongs to the other side.
    pub async fn request_rematch(&self) -> Result<(), MatchError> {
        if !self.phase.is_terminal() {
            return Err(MatchError::NotFinished);
        }
        let guard = MatchExpect {
            status: Some(MatchStatus::Finished),
            rematch: Some(RematchExpect::Unset),
            ..Default::default()
        };
        self.store
            .update_match_if(
                self.match_id,
                guard,
                MatchChange::RematchRequest { by: self.me },
            )
            .await?;
        tracing::info!(match_id = %self.match_id, by = %self.me, "rematch requested");
        Ok(())
    }

    /// Accepts the opponent's pending rematch request: the document is
    /// reset to a fresh game (empty board, host to move) and, unlike
    /// every other write, local flags are cleared immediately as well.
    /// The reset snapshot then arrives redundantly.
    pub async fn accept_rematch(&mut self) -> Result<(), MatchError> {
        let MatchPhase::AwaitingRematch { by } = self.phase else {
            return Err(MatchError::NoRematchRequest);
        };
        if by == self.me {
            return Err(MatchError::NoRematchRequest);
        }

        let guard = MatchExpect {
            status: Some(MatchStatus::Finished),
            rematch: Some(RematchExpect::By(by)),
            ..Default::default()
        };
        self.store
            .update_match_if(self.match_id, guard, MatchChange::RematchReset)
            .await?;

        MatchChange::RematchReset.apply(&mut self.doc);
        self.phase = MatchPhase::Playing;
        self.settled = false;
        tracing::info!(match_id = %self.match_id, "rematch accepted");
        Ok(())
    }

    /// Declines the opponent's pending rematch request by deleting the
    /// match, which ends the session on both sides.
    pub async fn decline_rematch(&self) -> Result<(), MatchError> {
        let MatchPhase::AwaitingRematch { by } = self.phase else {
            return Err(MatchError::NoRematchRequest);
        };
        if by == self.me {
            return Err(MatchError::NoRematchRequest);
        }
        self.store.delete_match(self.match_id).await?;
        tracing::info!(match_id = %self.match_id, "rematch declined");
        Ok(())
    }

    /// Leaves the match, deleting the document. There is no pause:
    /// leaving ends the match for both participants.
    pub async fn leave(self) -> Result<(), MatchError> {
        match self.store.delete_match(self.match_id).await {
            Ok(()) | Err(StoreError::MatchNotFound(_)) => {
                tracing::info!(
                    match_id = %self.match_id,
                    player = %self.me,
                    "left match"
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Appends a chat message to the match's log.
    pub async fn send_chat(
        &self,
        sender_name: &str,
        text: &str,
    ) -> Result<(), MatchError> {
        let message = chat::prepare_message(self.me, sender_name, text)?;
        self.store.append_message(self.match_id, message).await?;
        Ok(())
    }
}
