//! Resolve an (origin, destination) click pair into exactly one catalog move
//!
//! The catalog is authoritative: the matcher never asks whether a move is
//! legal, only whether the service listed it. The only ambiguity the service
//! produces is a promotion, which lists one token per piece; the user picks
//! through a [`PromotionPrompt`].

use crate::game::error::{GameError, GameResult};
use crate::game::move_token::MoveToken;
use crate::game::resources::PromotionPrompt;
use crate::game::types::{Piece, PieceKind, Side, Square};
use tracing::{debug, warn};

/// Find the catalog move the user meant
///
/// # Errors
///
/// - [`GameError::NoSuchMove`] when nothing in the catalog connects the squares
/// - [`GameError::PromotionCancelled`] when the prompt returns `None`
/// - [`GameError::InvalidPromotionChoice`] for a letter outside Q/R/N/B in the
///   mover's case, or a promotion the catalog does not list
/// - [`GameError::AmbiguousMove`] when several tokens match and the piece is
///   not a pawn about to promote
pub fn resolve_move(
    origin: Square,
    destination: Square,
    piece: Piece,
    catalog: &[MoveToken],
    prompt: &mut dyn PromotionPrompt,
) -> GameResult<MoveToken> {
    let no_such_move = || GameError::NoSuchMove {
        origin: origin.to_string(),
        destination: destination.to_string(),
    };

    if destination == origin {
        return Err(no_such_move());
    }

    if piece.is_king() {
        let sentinels = [
            MoveToken::CastleKingSide(piece.side),
            MoveToken::CastleQueenSide(piece.side),
        ];
        if let Some(castle) = sentinels
            .into_iter()
            .find(|s| s.destination() == destination && catalog.contains(s))
        {
            debug!("[MATCH] {} resolved to castling {}", piece, castle);
            return Ok(castle);
        }
    }

    let candidates: Vec<&MoveToken> = catalog
        .iter()
        .filter(|token| token.connects(origin, destination))
        .collect();

    match candidates.as_slice() {
        [] => Err(no_such_move()),
        [single] => Ok(**single),
        many if is_promotion_square(piece, origin) => {
            debug!(
                "[MATCH] {}{} has {} promotion candidates",
                origin,
                destination,
                many.len()
            );
            choose_promotion(origin, destination, piece.side, catalog, prompt)
        }
        many => {
            warn!(
                "[MATCH] {}{} matched {} catalog entries for {}",
                origin,
                destination,
                many.len(),
                piece
            );
            Err(GameError::AmbiguousMove {
                prefix: format!("{}{}", origin, destination),
                candidates: many.len(),
            })
        }
    }
}

/// Pawn standing on its side's second-to-last rank
///
/// This keys off the origin rank, not the destination.
pub fn is_promotion_square(piece: Piece, origin: Square) -> bool {
    piece.kind == PieceKind::Pawn && origin.rank == piece.side.pre_promotion_rank()
}

fn choose_promotion(
    origin: Square,
    destination: Square,
    side: Side,
    catalog: &[MoveToken],
    prompt: &mut dyn PromotionPrompt,
) -> GameResult<MoveToken> {
    let answer = prompt
        .choose(side, origin, destination)
        .ok_or(GameError::PromotionCancelled)?;
    let invalid = || GameError::InvalidPromotionChoice {
        choice: answer.clone(),
    };

    let mut letters = answer.trim().chars();
    let letter = match (letters.next(), letters.next()) {
        (Some(letter), None) => letter,
        _ => return Err(invalid()),
    };

    let piece = Piece::from_char(letter)
        .filter(|p| p.side == side && p.kind.is_promotion_target())
        .ok_or_else(invalid)?;

    let token = MoveToken::promotion(origin, destination, piece);
    if catalog.contains(&token) {
        Ok(token)
    } else {
        Err(invalid())
    }
}
