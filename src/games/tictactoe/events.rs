//! Notifications published by the turn controller.

use super::phases::Outcome;
use super::score::ScoreLedger;
use super::state::GameSnapshot;
use serde::Serialize;

/// Messages sent from the controller to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Board, turn or clock changed.
    StateChanged(GameSnapshot),
    /// The ledger recorded a finished game.
    ScoreChanged(ScoreLedger),
    /// One second of the turn elapsed.
    TimerTick {
        /// Seconds left.
        remaining: u32,
    },
    /// Game ended.
    GameEnded {
        /// Win or draw.
        outcome: Outcome,
        /// Display name of the winner; `None` for a draw.
        winner: Option<String>,
    },
}
