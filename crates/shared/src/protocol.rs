//! JSON messages exchanged with the position service
//!
//! The service answers every position-changing request with a full
//! [`ChessData`] snapshot. Analysis requests answer with [`PerftResult`] or
//! [`SearchResult`]; those never touch board state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of squares carried by every snapshot
pub const BOARD_SQUARES: usize = 64;

/// Full position snapshot as sent by the service
///
/// `board` is ordered a8, b8, ..., h8, a7, ..., h1. An empty square is `" "`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChessData {
    pub board: Vec<String>,
    pub side_to_move: String,
    #[serde(default)]
    pub en_passant_target: String,
    #[serde(default)]
    pub castling: String,
    #[serde(default)]
    pub halfmove: u32,
    #[serde(default)]
    pub fullmove: u32,
    /// Legal moves for the side to move. The service sends `null` when there are none.
    #[serde(default)]
    pub moves: Option<Vec<String>>,
}

impl ChessData {
    /// Move catalog with a `null` list treated as empty
    pub fn moves(&self) -> &[String] {
        self.moves.as_deref().unwrap_or(&[])
    }
}

/// Divided perft counts for the current position
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PerftResult {
    /// Node count per root move
    pub result: BTreeMap<String, u64>,
    pub total_node: u64,
    /// Elapsed milliseconds on the service
    pub time: u64,
}

/// Best move found by a fixed-depth search
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub searched_move: String,
    /// Elapsed milliseconds on the service
    pub time: u64,
}

/// HTTP endpoints exposed by the position service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Load a FEN position; an empty `fen` loads the starting position
    Fen,
    /// Mirror the board and hand the move to the other side
    Flip,
    /// Apply one move token
    Move,
    Perft,
    Search,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Fen => "/fen/",
            Endpoint::Flip => "/flip/",
            Endpoint::Move => "/move",
            Endpoint::Perft => "/perft",
            Endpoint::Search => "/search",
        }
    }

    /// Name of the single query parameter the endpoint takes, if any
    pub fn query_key(self) -> Option<&'static str> {
        match self {
            Endpoint::Fen => Some("fen"),
            Endpoint::Flip => None,
            Endpoint::Move => Some("move"),
            Endpoint::Perft | Endpoint::Search => Some("depth"),
        }
    }
}
