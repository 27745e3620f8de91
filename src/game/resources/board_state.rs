//! Board state store holding the last position snapshot
//!
//! The store is a plain holder: it keeps whatever the position service sent
//! last and nothing else. A snapshot is only ever built whole through
//! [`PositionSnapshot::try_from`], so a malformed service answer can never
//! leave a half-updated board behind.

use crate::game::error::{GameError, GameResult};
use crate::game::move_token::{parse_catalog, MoveToken};
use crate::game::types::{Piece, Side, Square};
use shared::protocol::{ChessData, BOARD_SQUARES};

/// One complete position as reported by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSnapshot {
    /// Indexed by [`Square::wire_index`]; always 64 entries
    placement: [Option<Piece>; BOARD_SQUARES],
    pub side_to_move: Side,
    /// Legal moves for `side_to_move`, in service order
    pub catalog: Vec<MoveToken>,
    pub en_passant_target: Option<Square>,
    pub castling: String,
    pub halfmove: u32,
    pub fullmove: u32,
}

impl PositionSnapshot {
    /// Build a snapshot from explicit parts (tests and tools)
    pub fn new(
        placement: [Option<Piece>; BOARD_SQUARES],
        side_to_move: Side,
        catalog: Vec<MoveToken>,
    ) -> Self {
        Self {
            placement,
            side_to_move,
            catalog,
            en_passant_target: None,
            castling: String::new(),
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Snapshot from a board diagram of eight rank strings, rank 8 first.
    ///
    /// Each string has eight characters; `.` or space marks an empty square.
    pub fn from_diagram(
        ranks: [&str; 8],
        side_to_move: Side,
        catalog: &[&str],
    ) -> GameResult<Self> {
        let mut cells = Vec::with_capacity(BOARD_SQUARES);
        for rank in ranks {
            if rank.chars().count() != 8 {
                return Err(GameError::InvalidSnapshot {
                    message: format!("diagram rank '{}' must have 8 squares", rank),
                });
            }
            cells.extend(rank.chars().map(|c| match c {
                '.' => " ".to_string(),
                other => other.to_string(),
            }));
        }
        let data = ChessData {
            board: cells,
            side_to_move: side_to_move.as_wire().to_string(),
            en_passant_target: String::new(),
            castling: String::new(),
            halfmove: 0,
            fullmove: 1,
            moves: Some(catalog.iter().map(|m| m.to_string()).collect()),
        };
        PositionSnapshot::try_from(&data)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.placement[square.wire_index()]
    }

    /// Every square with its occupant, in wire order (a8 first)
    pub fn placement(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |square| (square, self.piece_at(square)))
    }
}

impl TryFrom<&ChessData> for PositionSnapshot {
    type Error = GameError;

    fn try_from(data: &ChessData) -> GameResult<Self> {
        if data.board.len() != BOARD_SQUARES {
            return Err(GameError::InvalidSnapshot {
                message: format!(
                    "expected {} squares, got {}",
                    BOARD_SQUARES,
                    data.board.len()
                ),
            });
        }

        let mut placement = [None; BOARD_SQUARES];
        for (slot, cell) in placement.iter_mut().zip(&data.board) {
            *slot = Piece::from_wire(cell)?;
        }

        let side_to_move: Side = data.side_to_move.parse()?;
        let catalog = parse_catalog(data.moves())?;

        // The service writes "-" or an off-board square when there is no target
        let en_passant_target = Square::from_algebraic(data.en_passant_target.trim());

        Ok(Self {
            placement,
            side_to_move,
            catalog,
            en_passant_target,
            castling: data.castling.clone(),
            halfmove: data.halfmove,
            fullmove: data.fullmove,
        })
    }
}

/// Holder for the latest snapshot
#[derive(Debug, Default)]
pub struct BoardStateStore {
    current: Option<PositionSnapshot>,
    generation: u64,
}

impl BoardStateStore {
    /// Install a new snapshot, superseding the previous one entirely
    pub fn replace(&mut self, snapshot: PositionSnapshot) {
        self.current = Some(snapshot);
        self.generation += 1;
    }

    pub fn current(&self) -> GameResult<&PositionSnapshot> {
        self.current.as_ref().ok_or(GameError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Number of snapshots installed so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn side_to_move(&self) -> GameResult<Side> {
        Ok(self.current()?.side_to_move)
    }

    pub fn catalog(&self) -> GameResult<&[MoveToken]> {
        Ok(&self.current()?.catalog)
    }

    pub fn piece_at(&self, square: Square) -> GameResult<Option<Piece>> {
        Ok(self.current()?.piece_at(square))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::PieceKind;

    const START: [&str; 8] = [
        "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
        "RNBQKBNR",
    ];

    #[test]
    fn test_store_starts_uninitialized() {
        let store = BoardStateStore::default();
        assert!(!store.is_initialized());
        assert_eq!(store.current().unwrap_err(), GameError::NotInitialized);
        assert_eq!(store.side_to_move().unwrap_err(), GameError::NotInitialized);
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_replace_supersedes_catalog() {
        let mut store = BoardStateStore::default();
        store.replace(PositionSnapshot::from_diagram(START, Side::White, &["e2e4"]).unwrap());
        store.replace(PositionSnapshot::from_diagram(START, Side::Black, &["e7e5"]).unwrap());

        assert_eq!(store.generation(), 2);
        assert_eq!(store.side_to_move().unwrap(), Side::Black);
        assert_eq!(store.catalog().unwrap().len(), 1);
        assert_eq!(store.catalog().unwrap()[0].to_string(), "e7e5");
    }

    #[test]
    fn test_snapshot_placement_from_diagram() {
        let snapshot = PositionSnapshot::from_diagram(START, Side::White, &[]).unwrap();
        let e1: Square = "e1".parse().unwrap();
        let d8: Square = "d8".parse().unwrap();
        let e4: Square = "e4".parse().unwrap();

        assert_eq!(
            snapshot.piece_at(e1),
            Some(Piece::new(PieceKind::King, Side::White))
        );
        assert_eq!(
            snapshot.piece_at(d8),
            Some(Piece::new(PieceKind::Queen, Side::Black))
        );
        assert_eq!(snapshot.piece_at(e4), None);
        assert_eq!(snapshot.placement().count(), 64);
        assert_eq!(snapshot.placement().filter(|(_, p)| p.is_some()).count(), 32);
    }

    #[test]
    fn test_snapshot_rejects_short_board() {
        let data = ChessData {
            board: vec![" ".to_string(); 63],
            side_to_move: "white".to_string(),
            en_passant_target: String::new(),
            castling: String::new(),
            halfmove: 0,
            fullmove: 1,
            moves: None,
        };
        assert!(matches!(
            PositionSnapshot::try_from(&data),
            Err(GameError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_snapshot_rejects_bad_token_whole() {
        let result = PositionSnapshot::from_diagram(START, Side::White, &["e2e4", "e2"]);
        assert!(matches!(result, Err(GameError::InvalidMoveToken { .. })));
    }

    #[test]
    fn test_snapshot_reads_en_passant_target() {
        let mut data = ChessData {
            board: vec![" ".to_string(); 64],
            side_to_move: "black".to_string(),
            en_passant_target: "E3".to_string(),
            castling: "KQkq".to_string(),
            halfmove: 0,
            fullmove: 1,
            moves: None,
        };
        let snapshot = PositionSnapshot::try_from(&data).unwrap();
        assert_eq!(snapshot.en_passant_target, Some("e3".parse().unwrap()));
        assert!(snapshot.catalog.is_empty());

        data.en_passant_target = "-".to_string();
        let snapshot = PositionSnapshot::try_from(&data).unwrap();
        assert_eq!(snapshot.en_passant_target, None);
    }
}
