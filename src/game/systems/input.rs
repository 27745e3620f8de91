//! Click handling - the selection state machine
//!
//! [`BoardController`] owns all interaction state for one board view and
//! turns clicks into selections, deselections and resolved moves. It never
//! talks to the network itself: a resolved move comes back as a
//! [`SnapshotRequest`] for the caller to send, and the answer is handed back
//! through [`BoardController::install_snapshot`] or
//! [`BoardController::fail_request`].
//!
//! States are `Idle` (no selection) and `PieceSelected(piece, origin)`.
//! While a request is in flight every board click is answered with
//! [`ClickOutcome::Busy`].

use crate::game::error::{GameError, GameResult};
use crate::game::move_token::MoveToken;
use crate::game::resources::{
    BoardStateStore, HighlightSet, MoveHistory, PendingRefresh, PositionSnapshot,
    PromotionPrompt, Selection, SnapshotRequest,
};
use crate::game::rules::{highlight_targets, resolve_move};
use crate::game::types::{Piece, Square};
use tracing::{debug, error, info, warn};

/// What a click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No transition: empty square, opponent piece, or nothing selected
    Ignored,
    /// A snapshot request is in flight; the click was dropped
    Busy,
    /// A piece of the side to move is now selected
    Selected {
        piece: Piece,
        origin: Square,
        highlights: HighlightSet,
    },
    /// The selected piece was clicked again
    Deselected,
    /// A move was resolved and recorded; `request` must be sent to the service
    MoveResolved {
        token: MoveToken,
        request: SnapshotRequest,
    },
    /// No catalog move; the selection was dropped silently
    Rejected(GameError),
    /// Promotion cancelled or invalid; the selection is kept
    Retained(GameError),
}

/// Interaction state for one board view
#[derive(Debug, Default)]
pub struct BoardController {
    board: BoardStateStore,
    selection: Selection,
    history: MoveHistory,
    pending: PendingRefresh,
}

impl BoardController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click on `square`
    ///
    /// # Errors
    ///
    /// - [`GameError::NotInitialized`] before the first snapshot
    /// - [`GameError::OrphanRecord`] if the history rejects a resolved move
    ///
    /// Matching failures are not errors here; they come back as
    /// [`ClickOutcome::Rejected`] or [`ClickOutcome::Retained`].
    pub fn on_square_click(
        &mut self,
        square: Square,
        prompt: &mut dyn PromotionPrompt,
    ) -> GameResult<ClickOutcome> {
        if self.pending.is_pending() {
            debug!("[INPUT] Click on {} ignored while a request is in flight", square);
            return Ok(ClickOutcome::Busy);
        }

        let snapshot = self.board.current()?;

        let Some((piece, origin)) = self.selection.selected() else {
            return Ok(match snapshot.piece_at(square) {
                Some(piece) if piece.side == snapshot.side_to_move => {
                    let highlights = highlight_targets(&snapshot.catalog, piece, square);
                    debug!(
                        "[INPUT] Selected {} at {} ({} targets)",
                        piece,
                        square,
                        highlights.len()
                    );
                    self.selection.select(piece, square, highlights.clone());
                    ClickOutcome::Selected {
                        piece,
                        origin: square,
                        highlights,
                    }
                }
                Some(piece) => {
                    debug!(
                        "[INPUT] Ignored {} at {}: not {}'s piece",
                        piece, square, snapshot.side_to_move
                    );
                    ClickOutcome::Ignored
                }
                None => ClickOutcome::Ignored,
            });
        };

        if square == origin {
            self.selection.clear();
            debug!("[INPUT] Deselected {} at {}", piece, origin);
            return Ok(ClickOutcome::Deselected);
        }

        match resolve_move(origin, square, piece, &snapshot.catalog, prompt) {
            Ok(token) => {
                let side = snapshot.side_to_move;
                self.selection.clear();
                if let Err(e) = self.history.record(side, token, Some(piece)) {
                    error!("[INPUT] Could not record {}: {}", token, e);
                    return Err(e);
                }

                let request = SnapshotRequest::ApplyMove(token);
                self.pending.request(request.clone());
                info!("[INPUT] {} plays {}", side, token);
                Ok(ClickOutcome::MoveResolved { token, request })
            }
            Err(e) if e.preserves_selection() => {
                warn!("[INPUT] Keeping selection at {}: {}", origin, e);
                Ok(ClickOutcome::Retained(e))
            }
            Err(e) => {
                self.selection.clear();
                debug!("[INPUT] {}; selection cleared", e);
                Ok(ClickOutcome::Rejected(e))
            }
        }
    }

    /// Claim the request slot for an explicit request (refresh, set position, flip)
    ///
    /// Returns false when another request is still in flight.
    pub fn begin_request(&mut self, request: SnapshotRequest) -> bool {
        let accepted = self.pending.request(request.clone());
        if !accepted {
            warn!(
                "[INPUT] {} refused: {:?} still in flight",
                request,
                self.pending.in_flight()
            );
        }
        accepted
    }

    /// Install a fresh snapshot from the service
    ///
    /// Selection and highlights are always dropped. Loading a new position
    /// (starting position or FEN) restarts the history; any other snapshot
    /// keeps it, opening a row when the move passes to Black unrecorded.
    pub fn install_snapshot(&mut self, snapshot: PositionSnapshot) {
        let settled = self.pending.take();
        if matches!(
            settled,
            Some(SnapshotRequest::Current) | Some(SnapshotRequest::SetPosition(_))
        ) || !self.board.is_initialized()
        {
            self.history.start_from(snapshot.side_to_move);
        } else {
            self.history.align_to(snapshot.side_to_move);
        }

        info!(
            "[INPUT] Installed snapshot: {} to move, {} catalog moves",
            snapshot.side_to_move,
            snapshot.catalog.len()
        );
        self.board.replace(snapshot);
        self.selection.clear();
    }

    /// Settle a failed request, leaving the board as it was
    ///
    /// A move the service never applied is taken back out of the history.
    pub fn fail_request(&mut self) -> Option<SnapshotRequest> {
        let settled = self.pending.take();
        if let Some(SnapshotRequest::ApplyMove(token)) = &settled {
            if self.history.last_entry().map(|e| e.token) == Some(*token) {
                self.history.pop_last();
                warn!("[INPUT] Rolled back {} after failed request", token);
            }
        }
        settled
    }

    pub fn board(&self) -> &BoardStateStore {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Request currently awaiting an answer, if any
    pub fn in_flight(&self) -> Option<&SnapshotRequest> {
        self.pending.in_flight()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_pending()
    }
}
