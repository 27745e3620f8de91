//! Pawn promotion prompt
//!
//! When several catalog moves share an origin and destination, the pawn is
//! promoting and the user has to pick the piece. The prompt is a blocking
//! collaborator: the CLI reads a line from stdin, tests script the answer.

use crate::game::types::{Side, Square};
use std::collections::VecDeque;

/// Source of promotion choices
pub trait PromotionPrompt {
    /// Ask for a promotion letter. `None` means the user cancelled.
    ///
    /// The raw answer is returned unvalidated; the matcher checks it against
    /// Q/R/N/B in the mover's case and against the catalog.
    fn choose(&mut self, side: Side, origin: Square, destination: Square) -> Option<String>;
}

/// Prompt that always cancels, for callers that can never promote
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPromotion;

impl PromotionPrompt for NoPromotion {
    fn choose(&mut self, _side: Side, _origin: Square, _destination: Square) -> Option<String> {
        None
    }
}

/// Prompt answering from a prepared queue, cancelling once it runs dry
#[derive(Debug, Default, Clone)]
pub struct ScriptedPromotion {
    answers: VecDeque<Option<String>>,
    asked: usize,
}

impl ScriptedPromotion {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            asked: 0,
        }
    }

    /// How many times the prompt was consulted
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl PromotionPrompt for ScriptedPromotion {
    fn choose(&mut self, _side: Side, _origin: Square, _destination: Square) -> Option<String> {
        self.asked += 1;
        self.answers.pop_front().flatten()
    }
}

/// Letters offered to the user for a side, e.g. "Q, R, N, B"
pub fn promotion_letters(side: Side) -> String {
    crate::game::types::PieceKind::PROMOTIONS
        .iter()
        .map(|kind| side.apply_case(kind.letter()).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
