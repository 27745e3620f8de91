//! Move history resource
//!
//! Keeps every resolved move with its ply index and pairs them into display
//! rows: White opens a row, Black fills the second column of the open row.
//!
//! A position set from outside can start with Black to move. [`MoveHistory::start_from`]
//! opens a row with an empty first column for that case, so the first Black
//! move still has somewhere to go.

use crate::game::error::{GameError, GameResult};
use crate::game::move_token::MoveToken;
use crate::game::types::{Piece, Side};
use tracing::{debug, error};

/// One recorded half-move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub ply: usize,
    pub side: Side,
    pub token: MoveToken,
    /// Piece that moved, for display
    pub piece: Option<Piece>,
}

/// Display row: move number plus White and Black columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub number: usize,
    pub white: Option<HistoryEntry>,
    pub black: Option<HistoryEntry>,
}

impl HistoryRow {
    fn awaits_black(&self) -> bool {
        self.black.is_none()
    }

    fn is_blank(&self) -> bool {
        self.white.is_none() && self.black.is_none()
    }
}

#[derive(Debug, Default)]
pub struct MoveHistory {
    rows: Vec<HistoryRow>,
    next_ply: usize,
}

impl MoveHistory {
    /// Append one half-move with the next ply index
    pub fn record(
        &mut self,
        side: Side,
        token: MoveToken,
        piece: Option<Piece>,
    ) -> GameResult<&HistoryEntry> {
        let ply = self.next_ply;
        let entry = HistoryEntry {
            ply,
            side,
            token,
            piece,
        };

        let row = match side {
            Side::White => {
                let index = self.rows.len();
                self.rows.push(HistoryRow {
                    number: index + 1,
                    white: None,
                    black: None,
                });
                &mut self.rows[index]
            }
            Side::Black => match self.rows.last_mut() {
                Some(row) if row.awaits_black() => row,
                _ => {
                    error!("[HISTORY] Black move {} recorded with no open row", token);
                    return Err(GameError::OrphanRecord { ply });
                }
            },
        };

        self.next_ply += 1;
        debug!("[HISTORY] Ply {}: {} {}", ply, side, token);

        let column = match side {
            Side::White => &mut row.white,
            Side::Black => &mut row.black,
        };
        Ok(&*column.insert(entry))
    }

    /// Make sure the next move of `side` has a column to go into
    ///
    /// Called when a snapshot hands the move to a side without a move being
    /// recorded (a flipped board). Black gets a row with an empty White
    /// column; White drops such a row again if Black never used it.
    pub fn align_to(&mut self, side: Side) {
        let open_for_black = self.rows.last().is_some_and(HistoryRow::awaits_black);
        match side {
            Side::Black if !open_for_black => {
                let number = self.rows.len() + 1;
                debug!("[HISTORY] Opening row {} for Black", number);
                self.rows.push(HistoryRow {
                    number,
                    white: None,
                    black: None,
                });
            }
            Side::White if self.rows.last().is_some_and(HistoryRow::is_blank) => {
                self.rows.pop();
            }
            _ => {}
        }
    }

    /// Prepare for a new position whose first mover is `side`
    ///
    /// Clears everything; with Black to move, opens a row with an empty
    /// White column.
    pub fn start_from(&mut self, side: Side) {
        self.clear();
        if side == Side::Black {
            self.rows.push(HistoryRow {
                number: 1,
                white: None,
                black: None,
            });
        }
    }

    /// Remove the most recent entry (a move the service never applied)
    pub fn pop_last(&mut self) -> Option<HistoryEntry> {
        let row = self.rows.last_mut()?;
        let entry = match row.black.take() {
            Some(entry) => entry,
            None => {
                let entry = row.white.take()?;
                self.rows.pop();
                entry
            }
        };
        self.next_ply = entry.ply;
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.next_ply = 0;
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    /// Ply index the next recorded move will get
    pub fn next_ply(&self) -> usize {
        self.next_ply
    }

    /// Number of half-moves recorded
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.entries().last()
    }

    /// All entries in ply order
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.rows
            .iter()
            .flat_map(|row| row.white.iter().chain(row.black.iter()))
    }
}
