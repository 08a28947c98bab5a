//! Per-turn countdown.
//!
//! The countdown keeps no clock of its own. Whoever drives time calls
//! [`Countdown::tick`] once a second with the [`TimerStamp`] handed out by
//! [`Countdown::start`]. Every start and every stop retires the previous
//! stamp, so a tick scheduled for an earlier turn or an earlier game is
//! recognised and dropped.

use serde::Serialize;
use tracing::{debug, instrument};

/// Generation tag of one started countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerStamp(u64);

/// Observable timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimerState {
    /// Seconds left in the current turn.
    pub remaining_seconds: u32,
    /// Whether the countdown is live.
    pub running: bool,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The stamp belongs to a retired countdown; nothing changed.
    Stale,
    /// One second elapsed; this many remain.
    Remaining(u32),
    /// Time ran out and the countdown stopped itself.
    Expired,
}

/// Cancellable, generation-tagged countdown.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: u32,
    running: bool,
    generation: u64,
}

impl Countdown {
    /// Creates a stopped countdown.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the countdown, retiring any earlier stamp.
    #[instrument(skip(self))]
    pub fn start(&mut self, seconds: u32) -> TimerStamp {
        self.generation += 1;
        self.remaining = seconds;
        self.running = true;
        debug!(generation = self.generation, "Countdown started");
        TimerStamp(self.generation)
    }

    /// Cancels the countdown. Calling it on a stopped countdown does nothing.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.generation += 1;
        }
    }

    /// Advances the countdown by one second if `stamp` is current.
    pub fn tick(&mut self, stamp: TimerStamp) -> Tick {
        if self.stamp() != Some(stamp) {
            return Tick::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining)
        }
    }

    /// The live stamp, if the countdown is running.
    pub fn stamp(&self) -> Option<TimerStamp> {
        self.running.then_some(TimerStamp(self.generation))
    }

    /// Whether the countdown is live.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Snapshot of remaining time and running flag.
    pub fn state(&self) -> TimerState {
        TimerState {
            remaining_seconds: self.remaining,
            running: self.running,
        }
    }
}
