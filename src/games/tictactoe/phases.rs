//! Turn phases and game outcomes.

use super::Side;
use serde::Serialize;

/// Result of evaluating a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// No line complete and at least one empty cell.
    InProgress,
    /// A side completed a line.
    Win {
        /// The winning side.
        side: Side,
        /// Indices of the completed line, in line order.
        line: Vec<usize>,
    },
    /// Board full with no complete line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Win { side, .. } => Some(*side),
            _ => None,
        }
    }

    /// The completed line, or an empty slice.
    pub fn line(&self) -> &[usize] {
        match self {
            Outcome::Win { line, .. } => line,
            _ => &[],
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// Win or draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win { side, .. } => write!(f, "{} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Where the turn state machine stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for `side` to move.
    AwaitingMove {
        /// The active side.
        side: Side,
    },
    /// The game is over; the board is frozen.
    Terminal {
        /// How it ended. Never [`Outcome::InProgress`].
        outcome: Outcome,
    },
}

impl Phase {
    /// The side to move, if the game is still running.
    pub fn active_side(&self) -> Option<Side> {
        match self {
            Phase::AwaitingMove { side } => Some(*side),
            Phase::Terminal { .. } => None,
        }
    }

    /// True once a win or draw has been reached.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal { .. })
    }

    /// The final outcome, if any.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Phase::Terminal { outcome } => Some(outcome),
            Phase::AwaitingMove { .. } => None,
        }
    }
}
