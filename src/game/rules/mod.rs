//! Matching rules - pure functions over the move catalog
//!
//! Nothing here knows chess. The service's catalog is the only source of
//! truth; these functions only decide which catalog entries a click refers to.
//!
//! # Module Structure
//!
//! - `highlight` - Destination squares for a selected piece
//! - `matcher` - Turn an origin/destination pair into one move token

pub mod highlight;
pub mod matcher;

// Re-export commonly used items
pub use highlight::highlight_targets;
pub use matcher::{is_promotion_square, resolve_move};
