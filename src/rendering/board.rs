//! Text projection of the board, highlights and move history
//!
//! Every call redraws all 64 squares from the snapshot's placement; nothing
//! is cached between frames.
//!
//! Cell markers:
//!
//! ```text
//! [P]  selected piece
//!  *   highlighted empty square
//! (p)  highlighted capture
//! ```

use crate::game::resources::{HighlightSet, MoveHistory, PositionSnapshot, Selection};
use crate::game::types::{Piece, PieceKind, Side, Square};
use std::fmt::Write;

/// How to draw the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStyle {
    /// Rank 1 at the top, file h on the left
    pub flipped: bool,
    pub unicode: bool,
    /// Draw highlight markers
    pub show_hints: bool,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            flipped: false,
            unicode: false,
            show_hints: true,
        }
    }
}

/// Draw the position with the current selection and highlights
pub fn render_board(
    snapshot: &PositionSnapshot,
    selection: &Selection,
    style: BoardStyle,
) -> String {
    let empty = HighlightSet::default();
    let highlights = if style.show_hints {
        selection.highlights()
    } else {
        &empty
    };

    let mut squares: Vec<Square> = Square::all().collect();
    if style.flipped {
        squares.reverse();
    }

    let border = format!("  +{}+\n", "-".repeat(8 * 3));
    let mut out = String::new();
    out.push_str(&border);

    for row in squares.chunks(8) {
        let _ = write!(out, "{} |", row[0].rank.to_number());
        for &square in row {
            out.push_str(&render_cell(
                snapshot.piece_at(square),
                selection.origin() == Some(square),
                highlights.contains(square),
                style.unicode,
            ));
        }
        out.push_str("|\n");
    }

    out.push_str(&border);
    out.push_str("   ");
    for square in &squares[..8] {
        let _ = write!(out, " {} ", square.file.to_char());
    }
    out.push('\n');
    let _ = writeln!(out, "{} to move", snapshot.side_to_move);
    out
}

fn render_cell(piece: Option<Piece>, selected: bool, highlighted: bool, unicode: bool) -> String {
    match piece {
        Some(piece) => {
            let glyph = piece_glyph(piece, unicode);
            if selected {
                format!("[{}]", glyph)
            } else if highlighted {
                format!("({})", glyph)
            } else {
                format!(" {} ", glyph)
            }
        }
        None if highlighted => " * ".to_string(),
        None => " . ".to_string(),
    }
}

/// Letter or chess glyph for a piece
pub fn piece_glyph(piece: Piece, unicode: bool) -> char {
    if !unicode {
        return piece.to_char();
    }
    match (piece.side, piece.kind) {
        (Side::White, PieceKind::King) => '♔',
        (Side::White, PieceKind::Queen) => '♕',
        (Side::White, PieceKind::Rook) => '♖',
        (Side::White, PieceKind::Bishop) => '♗',
        (Side::White, PieceKind::Knight) => '♘',
        (Side::White, PieceKind::Pawn) => '♙',
        (Side::Black, PieceKind::King) => '♚',
        (Side::Black, PieceKind::Queen) => '♛',
        (Side::Black, PieceKind::Rook) => '♜',
        (Side::Black, PieceKind::Bishop) => '♝',
        (Side::Black, PieceKind::Knight) => '♞',
        (Side::Black, PieceKind::Pawn) => '♟',
    }
}

/// One line per move number: `12. e2e4  e7e5`
///
/// An empty White column (position set with Black to move) shows `...`.
pub fn render_history(history: &MoveHistory) -> String {
    let mut out = String::new();
    for row in history.rows() {
        let white = row
            .white
            .as_ref()
            .map_or_else(|| "...".to_string(), |e| e.token.to_string());
        let black = row
            .black
            .as_ref()
            .map(|e| e.token.to_string())
            .unwrap_or_default();
        let line = format!("{:>3}. {:<8}{}", row.number, white, black);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::highlight_targets;

    const START: [&str; 8] = [
        "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
        "RNBQKBNR",
    ];

    fn start() -> PositionSnapshot {
        PositionSnapshot::from_diagram(START, Side::White, &["e2e4", "e2e3"]).unwrap()
    }

    #[test]
    fn test_start_position_rows() {
        let text = render_board(&start(), &Selection::default(), BoardStyle::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "8 | r  n  b  q  k  b  n  r |");
        assert_eq!(lines[5], "4 | .  .  .  .  .  .  .  . |");
        assert_eq!(lines[8], "1 | R  N  B  Q  K  B  N  R |");
        assert!(lines[10].contains("a  b  c"));
        assert_eq!(lines[11], "White to move");
    }

    #[test]
    fn test_flipped_starts_from_rank_one() {
        let style = BoardStyle {
            flipped: true,
            ..BoardStyle::default()
        };
        let text = render_board(&start(), &Selection::default(), style);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "1 | R  N  B  K  Q  B  N  R |");
        assert!(lines[10].trim_start().starts_with('h'));
    }

    #[test]
    fn test_selection_markers() {
        let snapshot = start();
        let pawn = snapshot.piece_at("e2".parse().unwrap()).unwrap();
        let origin = "e2".parse().unwrap();
        let mut selection = Selection::default();
        selection.select(pawn, origin, highlight_targets(&snapshot.catalog, pawn, origin));

        let text = render_board(&snapshot, &selection, BoardStyle::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[7], "2 | P  P  P  P [P] P  P  P |");
        assert_eq!(lines[5], "4 | .  .  .  .  *  .  .  . |");
        assert_eq!(lines[6], "3 | .  .  .  .  *  .  .  . |");

        let no_hints = BoardStyle {
            show_hints: false,
            ..BoardStyle::default()
        };
        let plain = render_board(&snapshot, &selection, no_hints);
        assert!(!plain.contains('*'));
    }

    #[test]
    fn test_unicode_glyphs() {
        let king = Piece::new(PieceKind::King, Side::Black);
        assert_eq!(piece_glyph(king, true), '♚');
        assert_eq!(piece_glyph(king, false), 'k');
    }

    #[test]
    fn test_history_rows() {
        let mut history = MoveHistory::default();
        history.start_from(Side::Black);
        history
            .record(Side::Black, "e7e5".parse().unwrap(), None)
            .unwrap();
        history
            .record(Side::White, "g1f3".parse().unwrap(), None)
            .unwrap();

        let text = render_history(&history);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["  1. ...     e7e5", "  2. g1f3"]);
    }
}
