//! Complete game state for one game instance.

use super::action::Move;
use super::countdown::{Countdown, TimerState};
use super::error::EngineError;
use super::phases::{Outcome, Phase};
use super::{Board, Mode, Side};
use serde::Serialize;

/// Board, sides, phase and turn clock of one game.
///
/// A reset builds a new value around a fresh board. Only the stopped
/// countdown is carried over, so its stamps stay unique across games.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    mode: Mode,
    human_side: Side,
    phase: Phase,
    countdown: Countdown,
    history: Vec<Move>,
}

impl GameState {
    /// Creates a fresh game waiting on `human_side`, clock stopped.
    pub fn new(size: usize, mode: Mode, human_side: Side) -> Result<Self, EngineError> {
        Ok(Self::from_board(Board::new(size)?, mode, human_side))
    }

    /// Wraps an already validated board.
    pub fn from_board(board: Board, mode: Mode, human_side: Side) -> Self {
        Self {
            board,
            mode,
            human_side,
            phase: Phase::AwaitingMove { side: human_side },
            countdown: Countdown::new(),
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Edge length of the board.
    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Who is playing.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The side controlled by the (first) human.
    pub fn human_side(&self) -> Side {
        self.human_side
    }

    /// The computer's side in [`Mode::VsComputer`].
    pub fn computer_side(&self) -> Option<Side> {
        match self.mode {
            Mode::VsComputer => Some(self.human_side.opponent()),
            Mode::VsHuman => None,
        }
    }

    /// Turn phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The side to move, if any.
    pub fn active_side(&self) -> Option<Side> {
        self.phase.active_side()
    }

    /// True once a win or draw has been reached.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The completed line of a won game, otherwise empty.
    pub fn winning_line(&self) -> &[usize] {
        self.phase.outcome().map(Outcome::line).unwrap_or(&[])
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The turn clock.
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub(super) fn countdown_mut(&mut self) -> &mut Countdown {
        &mut self.countdown
    }

    /// Places the mark and records it (unchecked - contracts run first).
    pub(super) fn apply_move(&mut self, mov: Move) -> Result<(), EngineError> {
        self.board.place(mov.index, mov.side)?;
        self.history.push(mov);
        Ok(())
    }

    pub(super) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    #[cfg(test)]
    pub(super) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Read-only copy for observers.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            mode: self.mode,
            human_side: self.human_side,
            active_side: self.active_side(),
            terminal: self.is_terminal(),
            winning_line: self.winning_line().to_vec(),
            timer: self.countdown.state(),
        }
    }
}

/// Serializable view of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Cells and edge length.
    pub board: Board,
    /// Who is playing.
    pub mode: Mode,
    /// The (first) human's side.
    pub human_side: Side,
    /// Side to move, absent once terminal.
    pub active_side: Option<Side>,
    /// Whether the game is over.
    pub terminal: bool,
    /// Completed line, empty unless won.
    pub winning_line: Vec<usize>,
    /// Turn clock.
    pub timer: TimerState,
}
