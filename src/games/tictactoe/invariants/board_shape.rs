//! Board shape invariant: exactly size² cells.

use super::super::{GameState, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use super::Invariant;

/// Invariant: the board is square with an edge in the supported range.
pub struct BoardShapeInvariant;

impl Invariant<GameState> for BoardShapeInvariant {
    fn holds(game: &GameState) -> bool {
        let size = game.size();
        (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
            && game.board().cell_count() == size * size
    }

    fn description() -> &'static str {
        "Board holds exactly size² cells"
    }
}
