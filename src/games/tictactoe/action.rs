//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent
//! a side's intent and can be validated independently of execution.

use super::Side;
use derive_new::new;
use serde::Serialize;

/// A side placing its mark at a cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, new)]
pub struct Move {
    /// The side making the move.
    pub side: Side,
    /// Row-major cell index.
    pub index: usize,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.index)
    }
}
