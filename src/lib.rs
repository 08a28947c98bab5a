//! Strictly Tic-Tac-Toe - N×N tic-tac-toe with a turn clock
//!
//! Board sizes from 3×3 up, a computer opponent or two humans, a per-turn
//! countdown that hands the move to the other side when it runs out, and a
//! score ledger that survives resets.
//!
//! # Architecture
//!
//! - **Engine**: [`TurnController`] state machine over [`GameState`]
//! - **Rules**: pure win/draw evaluation ([`rules`])
//! - **Opponent**: tiered [`HeuristicOpponent`] with an injectable RNG
//! - **Driver**: [`GameDriver`] runs the engine in one tokio task
//!
//! # Example
//!
//! ```no_run
//! use strictly_tictactoe::{GameConfig, Mode, Side, TurnController};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = TurnController::new(GameConfig::default())?;
//! controller.start_game(Mode::VsHuman, 3, Side::X)?;
//! controller.submit_move(4, Side::X)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod driver;
mod games;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Driver
pub use driver::{Command, DriverClosed, DriverHandle, GameDriver};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Cell, Choice, Countdown, EngineError, GameEvent, GameSnapshot, GameState,
    HeuristicOpponent, IllegalMove, MAX_BOARD_SIZE, MIN_BOARD_SIZE, Mode, Move, Outcome, Phase,
    ScoreLedger, Side, Tick, TickOutcome, Tier, TimerStamp, TimerState, Transition, TurnController,
    TurnTicket,
};

// Crate-level exports - Verification layers
pub use games::tictactoe::{
    Contract, Invariant, InvariantSet, InvariantViolation, LegalMove, MoveContract,
    TicTacToeInvariants, contracts, invariants, rules,
};
