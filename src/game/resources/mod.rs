//! Board client resources - interaction state owned by the controller
//!
//! Every resource here is a plain data holder with no knowledge of the
//! position service or the renderer. The [`crate::game::systems::BoardController`]
//! owns exactly one of each, so there is no ambient global state.
//!
//! # Resource Categories
//!
//! ## Position
//! - [`BoardStateStore`] - Last snapshot received from the service
//! - [`PositionSnapshot`] - Placement, side to move and move catalog
//!
//! ## Player Interaction
//! - [`Selection`] - Currently selected piece and its [`HighlightSet`]
//! - [`PromotionPrompt`] - Collaborator asked for a promotion piece
//!
//! ## Game History
//! - [`MoveHistory`] - Ply-indexed record paired into display rows
//!
//! ## Requests
//! - [`PendingRefresh`] - The single snapshot request allowed in flight

pub mod board_state;
pub mod history;
pub mod pending;
pub mod promotion;
pub mod selection;

// Re-export all public items
pub use board_state::*;
pub use history::*;
pub use pending::*;
pub use promotion::*;
pub use selection::*;
