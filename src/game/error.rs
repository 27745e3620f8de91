//! Error types for game module
//!
//! Covers selection and matching failures, history invariants, and the
//! parse errors raised when a snapshot crosses into the core.

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The board was queried before the first snapshot arrived
    #[error("No position snapshot has been received yet")]
    NotInitialized,

    /// Destination is not in the catalog for the selected piece
    #[error("No move from {origin} to {destination} in the current catalog")]
    NoSuchMove { origin: String, destination: String },

    /// The user declined to pick a promotion piece
    #[error("Promotion cancelled")]
    PromotionCancelled,

    /// The promotion letter was not Q/R/N/B in the mover's case, or not in the catalog
    #[error("Invalid promotion choice: '{choice}'")]
    InvalidPromotionChoice { choice: String },

    /// Several catalog entries share a prefix outside the promotion condition
    #[error("Ambiguous move {prefix}: {candidates} candidates")]
    AmbiguousMove { prefix: String, candidates: usize },

    /// Black was recorded with no row open for it
    #[error("History entry for ply {ply} has no open row")]
    OrphanRecord { ply: usize },

    #[error("Invalid square: '{input}'")]
    InvalidSquare { input: String },

    #[error("Invalid piece: '{input}'")]
    InvalidPiece { input: String },

    #[error("Invalid move token: '{input}'")]
    InvalidMoveToken { input: String },

    #[error("Invalid snapshot: {message}")]
    InvalidSnapshot { message: String },
}

impl GameError {
    /// Failures after which the current selection is kept
    pub fn preserves_selection(&self) -> bool {
        matches!(
            self,
            GameError::PromotionCancelled
                | GameError::InvalidPromotionChoice { .. }
                | GameError::AmbiguousMove { .. }
        )
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
