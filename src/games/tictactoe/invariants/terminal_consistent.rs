//! Terminal flag agrees with the evaluator.

use super::super::GameState;
use super::super::phases::Outcome;
use super::super::rules::evaluate;
use super::Invariant;

/// Invariant: the phase is terminal exactly when the board is won or
/// drawn, and a terminal phase records the evaluator's outcome.
pub struct TerminalConsistentInvariant;

impl Invariant<GameState> for TerminalConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let evaluated = evaluate(game.board());
        match game.phase().outcome() {
            Some(outcome) => *outcome == evaluated,
            None => evaluated == Outcome::InProgress,
        }
    }

    fn description() -> &'static str {
        "Terminal phase matches the board's outcome"
    }
}
