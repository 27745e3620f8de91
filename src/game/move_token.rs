//! Move tokens as the position service writes them
//!
//! Tokens are parsed exactly once, when a snapshot is converted, so the
//! matcher and highlighter work on variants instead of slicing strings.
//!
//! | Form | Example | Variant |
//! |------|---------|---------|
//! | origin + destination | `e2e4` | `Regular` |
//! | + promotion letter | `e7e8Q`, `d2d1n` | `Regular` with `promotion` |
//! | + `EP` suffix | `e5d6EP` | `Regular` with `en_passant` |
//! | castling sentinels | `O-O`, `O-O-O`, `o-o`, `o-o-o` | `CastleKingSide` / `CastleQueenSide` |

use crate::game::error::{GameError, GameResult};
use crate::game::types::{File, Piece, Side, Square};
use std::fmt;
use std::str::FromStr;

const EN_PASSANT_SUFFIX: &str = "EP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveToken {
    Regular {
        origin: Square,
        destination: Square,
        promotion: Option<Piece>,
        en_passant: bool,
    },
    CastleKingSide(Side),
    CastleQueenSide(Side),
}

impl MoveToken {
    /// Plain origin-destination move
    pub fn regular(origin: Square, destination: Square) -> Self {
        MoveToken::Regular {
            origin,
            destination,
            promotion: None,
            en_passant: false,
        }
    }

    pub fn promotion(origin: Square, destination: Square, piece: Piece) -> Self {
        MoveToken::Regular {
            origin,
            destination,
            promotion: Some(piece),
            en_passant: false,
        }
    }

    /// Origin square of a regular move; castling sentinels carry none
    pub fn origin(&self) -> Option<Square> {
        match self {
            MoveToken::Regular { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    /// Square the moving piece lands on; for castling, the king's target
    pub fn destination(&self) -> Square {
        match self {
            MoveToken::Regular { destination, .. } => *destination,
            MoveToken::CastleKingSide(side) => castle_target(*side, File::G),
            MoveToken::CastleQueenSide(side) => castle_target(*side, File::C),
        }
    }

    pub fn castling_side(&self) -> Option<Side> {
        match self {
            MoveToken::CastleKingSide(side) | MoveToken::CastleQueenSide(side) => Some(*side),
            MoveToken::Regular { .. } => None,
        }
    }

    pub fn is_castling(&self) -> bool {
        self.castling_side().is_some()
    }

    /// True when origin and destination equal the given pair
    pub fn connects(&self, from: Square, to: Square) -> bool {
        matches!(
            self,
            MoveToken::Regular { origin, destination, .. }
                if *origin == from && *destination == to
        )
    }
}

fn castle_target(side: Side, file: File) -> Square {
    Square {
        file,
        rank: side.home_rank(),
    }
}

impl FromStr for MoveToken {
    type Err = GameError;

    fn from_str(s: &str) -> GameResult<Self> {
        let invalid = || GameError::InvalidMoveToken {
            input: s.to_string(),
        };

        match s {
            "O-O" => return Ok(MoveToken::CastleKingSide(Side::White)),
            "o-o" => return Ok(MoveToken::CastleKingSide(Side::Black)),
            "O-O-O" => return Ok(MoveToken::CastleQueenSide(Side::White)),
            "o-o-o" => return Ok(MoveToken::CastleQueenSide(Side::Black)),
            _ => {}
        }

        if !s.is_ascii() || s.len() < 4 {
            return Err(invalid());
        }

        let origin = Square::from_algebraic(&s[0..2]).ok_or_else(invalid)?;
        let destination = Square::from_algebraic(&s[2..4]).ok_or_else(invalid)?;
        let rest = &s[4..];

        let (promotion, en_passant) = if rest.is_empty() {
            (None, false)
        } else if rest.eq_ignore_ascii_case(EN_PASSANT_SUFFIX) {
            (None, true)
        } else if rest.len() == 1 {
            let piece = rest
                .chars()
                .next()
                .and_then(Piece::from_char)
                .filter(|piece| piece.kind.is_promotion_target())
                .ok_or_else(invalid)?;
            (Some(piece), false)
        } else {
            return Err(invalid());
        };

        Ok(MoveToken::Regular {
            origin,
            destination,
            promotion,
            en_passant,
        })
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveToken::Regular {
                origin,
                destination,
                promotion,
                en_passant,
            } => {
                write!(f, "{}{}", origin, destination)?;
                if let Some(piece) = promotion {
                    write!(f, "{}", piece.to_char())?;
                }
                if *en_passant {
                    f.write_str(EN_PASSANT_SUFFIX)?;
                }
                Ok(())
            }
            MoveToken::CastleKingSide(Side::White) => f.write_str("O-O"),
            MoveToken::CastleKingSide(Side::Black) => f.write_str("o-o"),
            MoveToken::CastleQueenSide(Side::White) => f.write_str("O-O-O"),
            MoveToken::CastleQueenSide(Side::Black) => f.write_str("o-o-o"),
        }
    }
}

/// Parse a whole catalog, failing on the first malformed token
pub fn parse_catalog<S: AsRef<str>>(raw: &[S]) -> GameResult<Vec<MoveToken>> {
    raw.iter().map(|token| token.as_ref().parse()).collect()
}
