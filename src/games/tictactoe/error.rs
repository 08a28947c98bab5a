//! Engine error types.

use super::types::{MAX_BOARD_SIZE, MIN_BOARD_SIZE, Side};
use derive_more::{Display, Error};

/// Why a move or turn operation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum IllegalMove {
    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", index)]
    CellOccupied {
        /// The occupied cell.
        index: usize,
    },

    /// The game has reached a terminal state.
    #[display("Game is already over")]
    GameOver,

    /// The mover is not the active side.
    #[display("It's not {}'s turn", side)]
    NotYourTurn {
        /// The side that tried to move.
        side: Side,
    },

    /// The side belongs to the computer and only moves through the opponent engine.
    #[display("{} is played by the computer", side)]
    ComputerTurn {
        /// The computer's side.
        side: Side,
    },

    /// The turn clock is not running.
    #[display("Turn clock is not running")]
    ClockStopped,
}

/// Error raised by the game engine. Every rejection leaves state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// Board edge outside the supported range.
    #[display("Board size {} is outside {}..={}", size, MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    InvalidSize {
        /// Requested edge length.
        size: usize,
    },

    /// Cell index outside the board.
    #[display("Cell {} is outside a board of {} cells", index, cells)]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The move breaks a rule of play.
    #[display("Illegal move: {}", reason)]
    IllegalMove {
        /// What rule was broken.
        reason: IllegalMove,
    },
}

impl From<IllegalMove> for EngineError {
    fn from(reason: IllegalMove) -> Self {
        EngineError::IllegalMove { reason }
    }
}

impl EngineError {
    /// True for rejections that stray input produces routinely.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, EngineError::IllegalMove { .. })
    }
}
