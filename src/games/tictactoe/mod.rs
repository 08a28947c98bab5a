//! N×N tic-tac-toe engine.
//!
//! [`TurnController`] owns a game: it validates moves through the
//! [`contracts`] layer, evaluates [`rules`], runs the per-turn
//! [`Countdown`], asks the [`HeuristicOpponent`] for computer moves and
//! keeps the session [`ScoreLedger`].

mod action;
pub mod contracts;
mod controller;
mod countdown;
mod error;
mod events;
pub mod invariants;
mod opponent;
mod phases;
pub mod rules;
mod score;
mod state;
mod types;

pub use action::Move;
pub use contracts::{Contract, LegalMove, MoveContract};
pub use controller::{TickOutcome, Transition, TurnController, TurnTicket};
pub use countdown::{Countdown, Tick, TimerStamp, TimerState};
pub use error::{EngineError, IllegalMove};
pub use events::GameEvent;
pub use invariants::{Invariant, InvariantSet, InvariantViolation, TicTacToeInvariants};
pub use opponent::{Choice, HeuristicOpponent, Tier};
pub use phases::{Outcome, Phase};
pub use score::ScoreLedger;
pub use state::{GameSnapshot, GameState};
pub use types::{Board, Cell, MAX_BOARD_SIZE, MIN_BOARD_SIZE, Mode, Side};
