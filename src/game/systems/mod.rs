//! Board interaction systems
//!
//! - [`input`] - Click handling: selection, deselection and move resolution
//!
//! ```text
//! ┌─────────────────┐
//! │ Idle            │  click own piece
//! │                 │  → PieceSelected + highlights
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ PieceSelected   │  click origin → Idle
//! │                 │  click elsewhere → matcher
//! └────────┬────────┘
//!          ↓
//! ┌─────────────────┐
//! │ Request pending │  history recorded, ApplyMove in flight
//! │                 │  → snapshot installed → Idle
//! └─────────────────┘
//! ```

pub mod input;

pub use input::{BoardController, ClickOutcome};
