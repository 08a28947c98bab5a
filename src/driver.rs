//! Async driver: runs a [`TurnController`] inside one tokio task.
//!
//! Commands, one-second clock ticks and the delayed computer reply all
//! feed the same `select!` loop, so at most one transition runs at a time.

use crate::games::tictactoe::{Mode, Side, TickOutcome, TimerStamp, TurnController, TurnTicket};
use derive_more::{Display, Error};
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument, warn};

const TICK: Duration = Duration::from_secs(1);

/// Input accepted by a running [`GameDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a mark for the local side.
    Move(usize),
    /// Switch between computer and two-human play.
    ChangeMode(Mode),
    /// Switch the human's side.
    ChangeSymbol(Side),
    /// Switch board size.
    ChangeBoardSize(usize),
    /// Start the clock after a reset.
    StartTimer,
    /// Clear the board.
    Reset,
    /// Stop the driver.
    Shutdown,
}

/// The driver task has exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Game driver has stopped")]
pub struct DriverClosed;

/// Cloneable sender for [`Command`]s.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    commands: UnboundedSender<Command>,
}

impl DriverHandle {
    /// Queues a command.
    pub fn send(&self, command: Command) -> Result<(), DriverClosed> {
        self.commands.send(command).map_err(|_| DriverClosed)
    }
}

/// Owns the controller and its pending deadlines.
pub struct GameDriver<R = StdRng> {
    controller: TurnController<R>,
    commands: UnboundedReceiver<Command>,
    opponent_delay: Duration,
    tick: Option<(TimerStamp, Instant)>,
    opponent: Option<(TurnTicket, Instant)>,
}

impl<R: Rng> GameDriver<R> {
    /// Wraps `controller`; the computer replies `opponent_delay` after its turn begins.
    pub fn new(controller: TurnController<R>, opponent_delay: Duration) -> (Self, DriverHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = Self {
            controller,
            commands: rx,
            opponent_delay,
            tick: None,
            opponent: None,
        };
        (driver, DriverHandle { commands: tx })
    }

    /// Runs until [`Command::Shutdown`] or every handle is dropped, then
    /// hands the controller back.
    #[instrument(skip(self), fields(delay_ms = self.opponent_delay.as_millis() as u64))]
    pub async fn run(mut self) -> TurnController<R> {
        info!("Driver started");
        self.sync_schedule();

        loop {
            let tick_at = self.tick.map(|(_, at)| at);
            let opponent_at = self.opponent.map(|(_, at)| at);

            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
                _ = sleep_until_some(tick_at) => self.fire_tick(),
                _ = sleep_until_some(opponent_at) => self.fire_opponent(),
            }

            self.sync_schedule();
        }

        info!("Driver stopped");
        self.controller
    }

    fn handle(&mut self, command: Command) {
        debug!(?command, "Command received");
        match command {
            Command::Move(index) => {
                if let Err(e) = self.controller.submit_local_move(index) {
                    if e.is_illegal_move() {
                        debug!(error = %e, "Ignoring move");
                    } else {
                        warn!(error = %e, "Move rejected");
                    }
                }
            }
            Command::ChangeMode(mode) => self.controller.change_mode(mode),
            Command::ChangeSymbol(side) => self.controller.change_symbol(side),
            Command::ChangeBoardSize(size) => {
                if let Err(e) = self.controller.change_board_size(size) {
                    warn!(error = %e, "Board size rejected");
                }
            }
            Command::StartTimer => {
                self.controller.start_timer();
            }
            Command::Reset => self.controller.reset(),
            Command::Shutdown => {}
        }
    }

    fn fire_tick(&mut self) {
        let Some((stamp, at)) = self.tick.take() else {
            return;
        };
        match self.controller.on_timer_tick(stamp) {
            TickOutcome::Ticked(_) => self.tick = Some((stamp, at + TICK)),
            TickOutcome::Expired(transition) => {
                debug!(?transition, "Turn expired");
            }
            TickOutcome::Stale => {}
        }
    }

    fn fire_opponent(&mut self) {
        let Some((ticket, _)) = self.opponent.take() else {
            return;
        };
        if let Some(transition) = self.controller.play_opponent(ticket) {
            debug!(?transition, "Opponent moved");
        }
    }

    /// Aligns deadlines with the controller's live stamp and ticket.
    fn sync_schedule(&mut self) {
        let now = Instant::now();

        self.tick = match (self.controller.timer_stamp(), self.tick) {
            (Some(stamp), Some((current, at))) if stamp == current => Some((current, at)),
            (Some(stamp), _) => Some((stamp, now + TICK)),
            (None, _) => None,
        };

        self.opponent = match (self.controller.pending_opponent(), self.opponent) {
            (Some(ticket), Some((current, at))) if ticket == current => Some((current, at)),
            (Some(ticket), _) => Some((ticket, now + self.opponent_delay)),
            (None, _) => None,
        };
    }
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
