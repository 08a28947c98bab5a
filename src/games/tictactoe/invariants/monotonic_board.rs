//! Monotonic board invariant: cells never change once set.

use super::super::{Board, Cell, GameState};
use super::Invariant;

/// Invariant: replaying the move history onto an empty board, never
/// touching an occupied cell, reproduces the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<GameState> for MonotonicBoardInvariant {
    fn holds(game: &GameState) -> bool {
        let Ok(mut reconstructed) = Board::new(game.size()) else {
            return false;
        };

        for mov in game.history() {
            if reconstructed.get(mov.index) != Some(Cell::Empty) {
                return false;
            }
            if reconstructed.place(mov.index, mov.side).is_err() {
                return false;
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
