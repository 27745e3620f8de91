//! Board vocabulary: squares, sides and pieces
//!
//! Newtypes keep files, ranks and wire indices from being mixed up. Parsing
//! is lenient about file case because the position service has emitted
//! upper-case files in some versions; everything displays in lower case.

use crate::game::error::{GameError, GameResult};
use std::fmt;
use std::str::FromStr;

/// Board coordinate representing a file (column) on the chessboard
///
/// Values range from 0 (file 'a') to 7 (file 'h').
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Queen-side castling target file
    pub const C: File = File(2);
    /// King-side castling target file
    pub const G: File = File(6);

    /// Create a file from a character ('a'..='h', either case)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            c @ 'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
///
/// Values range from 0 (rank 1) to 7 (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank from a number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=8).contains(&n) {
            Some(Rank(n - 1))
        } else {
            None
        }
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// One of the 64 board squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Create a square from file and rank indices (both 0-7)
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square {
                file: File(file),
                rank: Rank(rank),
            })
        } else {
            None
        }
    }

    /// Create a square from algebraic notation (e.g., "e4" or "E4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let rank_num = rank_char.to_digit(10)? as u8;

        Some(Square {
            file: File::from_char(file_char)?,
            rank: Rank::from_number(rank_num)?,
        })
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file.to_char(), self.rank.to_number())
    }

    /// Square at a position of the service's board array (a8 first, h1 last)
    pub fn from_wire_index(index: usize) -> Option<Self> {
        if index >= 64 {
            return None;
        }
        let file = (index % 8) as u8;
        let rank = 7 - (index / 8) as u8;
        Square::new(file, rank)
    }

    /// Position of this square in the service's board array
    pub fn wire_index(self) -> usize {
        (7 - self.rank.index() as usize) * 8 + self.file.index() as usize
    }

    /// All squares in wire order (a8..h8, a7..h7, ..., a1..h1)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_wire_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        Square::from_algebraic(s.trim()).ok_or_else(|| GameError::InvalidSquare {
            input: s.to_string(),
        })
    }
}

/// The two sides; White moves with upper-case letters, Black with lower-case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank a pawn of this side promotes from (rank 7 for White, rank 2 for Black)
    pub fn pre_promotion_rank(self) -> Rank {
        match self {
            Side::White => Rank(6),
            Side::Black => Rank(1),
        }
    }

    /// Back rank the king castles along
    pub fn home_rank(self) -> Rank {
        match self {
            Side::White => Rank(0),
            Side::Black => Rank(7),
        }
    }

    /// Side owning a letter, by case
    pub fn of_letter(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Side::White)
        } else if c.is_ascii_lowercase() {
            Some(Side::Black)
        } else {
            None
        }
    }

    /// Put a letter into this side's case
    pub fn apply_case(self, c: char) -> char {
        match self {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::White => "White",
            Side::Black => "Black",
        })
    }
}

impl FromStr for Side {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Side::White),
            "black" | "b" => Ok(Side::Black),
            _ => Err(GameError::InvalidSnapshot {
                message: format!("unknown side to move '{}'", s),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Pieces a pawn may promote to, in the order the prompt lists them
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
    ];

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Upper-case letter for this kind
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }
}

/// A piece: kind plus owning side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// Parse a piece letter; the case decides the side
    pub fn from_char(c: char) -> Option<Self> {
        Some(Piece {
            kind: PieceKind::from_letter(c)?,
            side: Side::of_letter(c)?,
        })
    }

    /// Parse one square of the service's board array. Blank means empty.
    pub fn from_wire(cell: &str) -> GameResult<Option<Self>> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_char(c)
                .map(Some)
                .ok_or_else(|| GameError::InvalidPiece {
                    input: cell.to_string(),
                }),
            _ => Err(GameError::InvalidPiece {
                input: cell.to_string(),
            }),
        }
    }

    pub fn to_char(self) -> char {
        self.side.apply_case(self.kind.letter())
    }

    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
