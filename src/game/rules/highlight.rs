//! Destination squares to mark for a selected piece

use crate::game::move_token::MoveToken;
use crate::game::resources::HighlightSet;
use crate::game::types::{Piece, Square};

/// Squares the selected piece can reach according to the catalog
///
/// A castling sentinel contributes its fixed king target (g1/c1/g8/c8) when
/// the selected piece is the king of the sentinel's side, whatever the
/// origin square. Regular moves contribute their destination when they start
/// on `origin`. Nothing beyond catalog membership is checked.
pub fn highlight_targets(catalog: &[MoveToken], piece: Piece, origin: Square) -> HighlightSet {
    catalog
        .iter()
        .filter(|token| match token.castling_side() {
            Some(side) => piece.is_king() && piece.side == side,
            None => token.origin() == Some(origin),
        })
        .map(MoveToken::destination)
        .collect()
}
