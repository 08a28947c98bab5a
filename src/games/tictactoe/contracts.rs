//! Contract-based validation for tic-tac-toe.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::Move;
use super::error::IllegalMove;
use super::invariants::{InvariantSet, InvariantViolation, TicTacToeInvariants};
use super::state::GameState;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMove>;

    /// Checks postconditions after applying the action.
    fn post(after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameInPlay;

impl GameInPlay {
    /// Rejects moves on a terminal game.
    pub fn check(game: &GameState) -> Result<(), IllegalMove> {
        if game.is_terminal() {
            Err(IllegalMove::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects moves by the inactive side.
    pub fn check(mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        if game.active_side() != Some(mov.side) {
            Err(IllegalMove::NotYourTurn { side: mov.side })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the turn clock must be running.
pub struct ClockRunning;

impl ClockRunning {
    /// Rejects moves while the countdown is stopped.
    pub fn check(game: &GameState) -> Result<(), IllegalMove> {
        if game.countdown().is_running() {
            Ok(())
        } else {
            Err(IllegalMove::ClockStopped)
        }
    }
}

/// Precondition: the target cell must be empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects moves onto occupied cells.
    pub fn check(mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        if game.board().is_vacant(mov.index) {
            Ok(())
        } else {
            Err(IllegalMove::CellOccupied { index: mov.index })
        }
    }
}

/// Composite precondition, checked in order: game in play, mover's turn,
/// clock running, cell empty.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mov: &Move, game: &GameState) -> Result<(), IllegalMove> {
        GameInPlay::check(game)?;
        PlayersTurn::check(mov, game)?;
        ClockRunning::check(game)?;
        CellIsEmpty::check(mov, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions: board shape, monotonic board, terminal consistency.
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(game: &GameState, action: &Move) -> Result<(), IllegalMove> {
        LegalMove::check(action, game)
    }

    fn post(after: &GameState) -> Result<(), Vec<InvariantViolation>> {
        TicTacToeInvariants::check_all(after)
    }
}

/// Checks postconditions in debug builds, logging and asserting on violation.
#[instrument(skip(game))]
pub fn assert_invariants(game: &GameState) {
    if !cfg!(debug_assertions) {
        return;
    }
    let result = MoveContract::post(game);
    if let Err(violations) = &result {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
    }
    debug_assert!(result.is_ok(), "Postcondition failed");
}
