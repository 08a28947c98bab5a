//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]; they never look at whose turn it is,
//! which keeps them usable for the opponent's hypothetical placements.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, lines};

use super::Board;
use super::phases::Outcome;
use tracing::instrument;

/// Evaluates the board: first completed line wins, then a full board draws.
#[instrument(skip(board), fields(size = board.size()))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((side, line)) = check_winner(board) {
        Outcome::Win { side, line }
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
