//! Session stopwatch: time since the previous log line and since the start.

use crate::clock::Clock;
use std::sync::Arc;

/// One stopwatch measurement, all derived from a single clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The clock reading this tick was taken at
    pub now_ms: u64,
    /// Milliseconds since the previous tick (or the start)
    pub elapsed_ms: u64,
    /// Milliseconds since the start
    pub total_ms: u64,
}

pub struct Stopwatch {
    clock: Arc<dyn Clock>,
    start_time_ms: u64,
    last_tick_ms: u64,
}

impl Stopwatch {
    /// Create a stopwatch that is already started.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_millis();
        Self {
            clock,
            start_time_ms: now,
            last_tick_ms: now,
        }
    }

    /// Restart: both checkpoints move to the current time.
    pub fn start(&mut self) {
        let now = self.clock.now_millis();
        self.start_time_ms = now;
        self.last_tick_ms = now;
    }

    /// Measure and advance the last-tick checkpoint.
    ///
    /// A clock that stepped backwards yields zero deltas, and neither
    /// checkpoint moves before the start.
    pub fn tick(&mut self) -> Tick {
        let now = self.clock.now_millis().max(self.start_time_ms);
        let tick = Tick {
            now_ms: now,
            elapsed_ms: now.saturating_sub(self.last_tick_ms),
            total_ms: now - self.start_time_ms,
        };
        self.last_tick_ms = now;
        tick
    }

    pub fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }

    /// Current reading of the underlying clock, without ticking.
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }
}
