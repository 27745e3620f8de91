//! Selection resource for tracking the selected piece and its highlights

use crate::game::types::{Piece, Square};
use std::collections::BTreeSet;

/// Destination squares marked for the selected piece
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    squares: BTreeSet<Square>,
}

impl HighlightSet {
    pub fn insert(&mut self, square: Square) {
        self.squares.insert(square);
    }

    pub fn contains(&self, square: Square) -> bool {
        self.squares.contains(&square)
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares.iter().copied()
    }
}

impl FromIterator<Square> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        Self {
            squares: iter.into_iter().collect(),
        }
    }
}

/// Currently selected piece, if any
#[derive(Debug, Default)]
pub struct Selection {
    selected: Option<(Piece, Square)>,
    highlights: HighlightSet,
}

impl Selection {
    /// Select a piece; highlights are replaced, never merged
    pub fn select(&mut self, piece: Piece, origin: Square, highlights: HighlightSet) {
        self.selected = Some((piece, origin));
        self.highlights = highlights;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.highlights = HighlightSet::default();
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<(Piece, Square)> {
        self.selected
    }

    pub fn origin(&self) -> Option<Square> {
        self.selected.map(|(_, origin)| origin)
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }
}
