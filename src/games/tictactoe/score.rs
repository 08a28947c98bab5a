//! Session score ledger.

use super::Side;
use super::phases::Outcome;
use derive_getters::Getters;
use serde::Serialize;
use tracing::instrument;

/// Win and draw tallies for one session. Counters only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize)]
pub struct ScoreLedger {
    /// Games won by the human side (first player in two-human mode).
    human_wins: u32,
    /// Games won by the computer or the second player.
    opponent_wins: u32,
    /// Drawn games.
    draws: u32,
}

impl ScoreLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies a finished game. In-progress outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: &Outcome, human_side: Side) {
        match outcome {
            Outcome::Win { side, .. } if *side == human_side => self.human_wins += 1,
            Outcome::Win { .. } => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    /// Number of finished games recorded.
    pub fn games(&self) -> u32 {
        self.human_wins + self.opponent_wins + self.draws
    }
}
