//! Turn controller: the state machine that owns a game.
//!
//! Every input (a move, a clock tick, the deferred computer reply, a
//! settings change) arrives as one method call and runs to completion
//! before the next. Calls that refer to an earlier turn carry a
//! [`TimerStamp`] or [`TurnTicket`] and are dropped once that turn is gone.

use super::action::Move;
use super::contracts::{ClockRunning, Contract, GameInPlay, MoveContract, assert_invariants};
use super::countdown::{Tick, TimerStamp};
use super::error::{EngineError, IllegalMove};
use super::events::GameEvent;
use super::opponent::HeuristicOpponent;
use super::phases::{Outcome, Phase};
use super::rules::evaluate;
use super::score::ScoreLedger;
use super::state::{GameSnapshot, GameState};
use super::{Board, Mode, Side};
use crate::config::GameConfig;
use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Identifies one computer turn; handed out when the computer is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnTicket(u64);

/// Where an accepted input left the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A human side is to move.
    Continue {
        /// The side to move.
        side: Side,
    },
    /// The computer is to move; redeem the ticket with
    /// [`TurnController::play_opponent`].
    OpponentToMove {
        /// Ticket for this computer turn.
        ticket: TurnTicket,
    },
    /// The game ended.
    Finished(Outcome),
}

/// What a timer tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a retired countdown.
    Stale,
    /// One second elapsed; this many remain.
    Ticked(u32),
    /// Time ran out and the turn passed to the other side.
    Expired(Transition),
}

/// Owns the current [`GameState`], the session [`ScoreLedger`] and the opponent.
pub struct TurnController<R = StdRng> {
    config: GameConfig,
    state: GameState,
    ledger: ScoreLedger,
    opponent: HeuristicOpponent<R>,
    turn: u64,
    pending_opponent: Option<TurnTicket>,
    events: Option<UnboundedSender<GameEvent>>,
}

impl TurnController<StdRng> {
    /// Creates a controller with an OS-seeded opponent.
    ///
    /// The first game is set up but its clock is stopped; call
    /// [`start_game`](Self::start_game) or [`start_timer`](Self::start_timer).
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        Self::with_opponent(config, HeuristicOpponent::new())
    }
}

impl<R: Rng> TurnController<R> {
    /// Creates a controller around a given opponent.
    #[instrument(skip(opponent))]
    pub fn with_opponent(
        config: GameConfig,
        opponent: HeuristicOpponent<R>,
    ) -> Result<Self, EngineError> {
        let state = GameState::new(*config.board_size(), *config.mode(), *config.human_side())?;
        Ok(Self {
            config,
            state,
            ledger: ScoreLedger::new(),
            opponent,
            turn: 0,
            pending_opponent: None,
            events: None,
        })
    }

    /// Publishes [`GameEvent`]s on `events` from now on.
    pub fn with_events(mut self, events: UnboundedSender<GameEvent>) -> Self {
        self.events = Some(events);
        self
    }

    // ─────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────

    /// Current game.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Session tallies.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Active settings.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only copy of the current game.
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Stamp of the running countdown, if any.
    pub fn timer_stamp(&self) -> Option<TimerStamp> {
        self.state.countdown().stamp()
    }

    /// Ticket of the computer turn awaiting [`play_opponent`](Self::play_opponent).
    pub fn pending_opponent(&self) -> Option<TurnTicket> {
        self.pending_opponent
    }

    /// Name shown for `side`.
    ///
    /// Two humans: X is the first name, O the second. Against the computer:
    /// the human's side is the first name, the computer's the second.
    pub fn display_name(&self, side: Side) -> &str {
        let first = match self.config.mode() {
            Mode::VsHuman => side == Side::X,
            Mode::VsComputer => side == *self.config.human_side(),
        };
        if first {
            self.config.player_one_name()
        } else {
            self.config.player_two_name()
        }
    }

    /// The side a local click moves for: the human in computer mode,
    /// whoever is active in two-human mode.
    pub fn local_side(&self) -> Side {
        match self.state.mode() {
            Mode::VsComputer => self.state.human_side(),
            Mode::VsHuman => self
                .state
                .active_side()
                .unwrap_or_else(|| self.state.human_side()),
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────

    /// Starts a fresh game: new board, `human_side` to move, clock running.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSize`] if `size` is out of range; nothing changes.
    #[instrument(skip(self))]
    pub fn start_game(
        &mut self,
        mode: Mode,
        size: usize,
        human_side: Side,
    ) -> Result<(), EngineError> {
        let board = Board::new(size)?;
        self.config = std::mem::take(&mut self.config)
            .with_mode(mode)
            .with_board_size(size)
            .with_human_side(human_side);
        self.replace_state(board);
        self.begin_turn(human_side);
        info!("Game started");
        self.emit_state();
        Ok(())
    }

    /// Clears the board and returns to the starting side with the clock
    /// stopped. The ledger is kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let board = self.state.board().cleared();
        self.replace_state(board);
        info!("Game reset");
        self.emit_state();
    }

    /// Switches mode and resets.
    #[instrument(skip(self))]
    pub fn change_mode(&mut self, mode: Mode) {
        self.config = std::mem::take(&mut self.config).with_mode(mode);
        self.reset();
    }

    /// Switches the human's side (the opening side) and resets.
    #[instrument(skip(self))]
    pub fn change_symbol(&mut self, side: Side) {
        self.config = std::mem::take(&mut self.config).with_human_side(side);
        self.reset();
    }

    /// Switches board size and resets.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidSize`] if `size` is out of range; nothing changes.
    #[instrument(skip(self))]
    pub fn change_board_size(&mut self, size: usize) -> Result<(), EngineError> {
        let board = Board::new(size)?;
        self.config = std::mem::take(&mut self.config).with_board_size(size);
        self.replace_state(board);
        info!("Board resized");
        self.emit_state();
        Ok(())
    }

    /// Starts the clock for the current turn if it is stopped and the game
    /// is not over. Returns whether it started.
    #[instrument(skip(self))]
    pub fn start_timer(&mut self) -> bool {
        if self.state.is_terminal() || self.state.countdown().is_running() {
            debug!("Start request ignored");
            return false;
        }
        self.state.countdown_mut().start(*self.config.turn_seconds());
        self.emit_state();
        true
    }

    // ─────────────────────────────────────────────────────────
    //  Turn inputs
    // ─────────────────────────────────────────────────────────

    /// Places `side`'s mark at `index`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::IndexOutOfRange`] for an index off the board.
    /// - [`EngineError::IllegalMove`] when the game is over, `side` is not
    ///   to move, the clock is stopped, the cell is taken, or `side`
    ///   belongs to the computer.
    ///
    /// A rejected move changes nothing.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, index: usize, side: Side) -> Result<Transition, EngineError> {
        let cells = self.state.board().cell_count();
        if index >= cells {
            return Err(EngineError::IndexOutOfRange { index, cells });
        }

        let mov = Move::new(side, index);
        if let Err(reason) = MoveContract::pre(&self.state, &mov) {
            debug!(%reason, "Move rejected");
            return Err(reason.into());
        }
        if self.state.computer_side() == Some(side) {
            debug!("Move rejected: side belongs to the computer");
            return Err(IllegalMove::ComputerTurn { side }.into());
        }

        self.commit(mov)
    }

    /// [`submit_move`](Self::submit_move) for [`local_side`](Self::local_side).
    pub fn submit_local_move(&mut self, index: usize) -> Result<Transition, EngineError> {
        let side = self.local_side();
        self.submit_move(index, side)
    }

    /// Advances the clock by one second for the countdown named by `stamp`.
    #[instrument(skip(self))]
    pub fn on_timer_tick(&mut self, stamp: TimerStamp) -> TickOutcome {
        match self.state.countdown_mut().tick(stamp) {
            Tick::Stale => {
                debug!("Ignoring stale timer tick");
                TickOutcome::Stale
            }
            Tick::Remaining(remaining) => {
                self.emit(GameEvent::TimerTick { remaining });
                TickOutcome::Ticked(remaining)
            }
            Tick::Expired => {
                self.emit(GameEvent::TimerTick { remaining: 0 });
                match self.state.active_side() {
                    Some(side) => TickOutcome::Expired(self.forfeit_turn(side)),
                    None => TickOutcome::Stale,
                }
            }
        }
    }

    /// Passes the turn to the other side without a move.
    ///
    /// # Errors
    ///
    /// [`EngineError::IllegalMove`] when the game is over or the clock is stopped.
    #[instrument(skip(self))]
    pub fn on_timer_expiry(&mut self) -> Result<Transition, EngineError> {
        GameInPlay::check(&self.state)?;
        ClockRunning::check(&self.state)?;
        let Phase::AwaitingMove { side } = *self.state.phase() else {
            return Err(IllegalMove::GameOver.into());
        };
        Ok(self.forfeit_turn(side))
    }

    /// Plays the computer's move for the turn named by `ticket`.
    ///
    /// Returns `None` when the ticket is stale or no cell is free.
    #[instrument(skip(self))]
    pub fn play_opponent(&mut self, ticket: TurnTicket) -> Option<Transition> {
        if self.pending_opponent != Some(ticket) {
            debug!("Ignoring stale opponent callback");
            return None;
        }
        let computer = self.state.computer_side()?;
        let human = self.state.human_side();
        let choice = self.opponent.choose(self.state.board(), computer, human)?;
        self.pending_opponent = None;

        match self.commit(Move::new(computer, choice.index)) {
            Ok(transition) => Some(transition),
            Err(e) => {
                warn!(error = %e, "Opponent move failed");
                None
            }
        }
    }

    /// Plays the pending computer move, if there is one, without delay.
    pub fn play_pending_opponent(&mut self) -> Option<Transition> {
        let ticket = self.pending_opponent?;
        self.play_opponent(ticket)
    }

    // ─────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────

    fn replace_state(&mut self, board: Board) {
        self.turn += 1;
        self.pending_opponent = None;
        // The countdown outlives the game so its generations never repeat.
        let mut countdown = std::mem::take(self.state.countdown_mut());
        countdown.stop();
        self.state = GameState::from_board(board, *self.config.mode(), *self.config.human_side());
        *self.state.countdown_mut() = countdown;
    }

    fn commit(&mut self, mov: Move) -> Result<Transition, EngineError> {
        self.state.apply_move(mov)?;
        debug!(%mov, "Move applied");

        let outcome = evaluate(self.state.board());
        let transition = if outcome.is_terminal() {
            self.finish(outcome)
        } else {
            let transition = self.begin_turn(mov.side.opponent());
            self.emit_state();
            transition
        };
        assert_invariants(&self.state);
        Ok(transition)
    }

    fn forfeit_turn(&mut self, side: Side) -> Transition {
        info!(%side, "Turn forfeited on time");
        let transition = self.begin_turn(side.opponent());
        self.emit_state();
        assert_invariants(&self.state);
        transition
    }

    fn begin_turn(&mut self, side: Side) -> Transition {
        self.turn += 1;
        self.state.set_phase(Phase::AwaitingMove { side });
        self.state.countdown_mut().start(*self.config.turn_seconds());

        if self.state.computer_side() == Some(side) {
            let ticket = TurnTicket(self.turn);
            self.pending_opponent = Some(ticket);
            Transition::OpponentToMove { ticket }
        } else {
            self.pending_opponent = None;
            Transition::Continue { side }
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Transition {
        self.turn += 1;
        self.pending_opponent = None;
        self.state.countdown_mut().stop();
        self.state.set_phase(Phase::Terminal {
            outcome: outcome.clone(),
        });
        self.ledger.record(&outcome, self.state.human_side());

        let winner = outcome.winner().map(|side| self.display_name(side).to_string());
        info!(%outcome, winner = ?winner, "Game over");

        self.emit_state();
        self.emit(GameEvent::ScoreChanged(self.ledger));
        self.emit(GameEvent::GameEnded {
            outcome: outcome.clone(),
            winner,
        });
        Transition::Finished(outcome)
    }

    fn emit_state(&self) {
        self.emit(GameEvent::StateChanged(self.state.snapshot()));
    }

    fn emit(&self, event: GameEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }
}
