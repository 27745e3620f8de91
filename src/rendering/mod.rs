//! Rendering module - text projection for the interactive CLI
//!
//! - `board` - Board grid with selection and highlight markers, plus the
//!   two-column move history

pub mod board;

pub use board::{piece_glyph, render_board, render_history, BoardStyle};
