//! Board client logic - selection, matching and history
//!
//! Everything in this module is synchronous and side-effect free apart from
//! logging. The position service is reached through [`crate::networking`];
//! this module only produces [`resources::SnapshotRequest`]s and consumes
//! [`resources::PositionSnapshot`]s.
//!
//! # Module Organization
//!
//! - `types` - Squares, files, ranks, sides and pieces
//! - `move_token` - Parsed catalog entries (regular, promotion, en passant, castling)
//! - `error` - [`GameError`] and [`GameResult`]
//! - `resources` - State holders (board store, selection, history, pending request)
//! - `rules` - Highlight calculation and move matching
//! - `systems` - The [`BoardController`] state machine

pub mod error;
pub mod move_token;
pub mod resources;
pub mod rules;
pub mod systems;
pub mod types;

pub use error::{GameError, GameResult};
pub use move_token::MoveToken;
pub use systems::{BoardController, ClickOutcome};
