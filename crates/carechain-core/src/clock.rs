//! Clock implementations.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::traits::Clock;

/// The production clock: `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A hand-driven clock for tests and demos.
///
/// Every call to `now()` returns the current instant and then advances it
/// by the configured tick, so successive entries get distinct, ordered
/// timestamps without sleeping.
pub struct ManualClock {
    state: Mutex<DateTime<Utc>>,
    tick: Duration,
}

impl ManualClock {
    /// A clock starting at `start`, advancing one second per reading.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(start),
            tick: Duration::seconds(1),
        }
    }

    /// Override the per-reading advance.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Jump the clock forward without producing a reading.
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock().expect("clock lock poisoned");
        *state += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut state = self.state.lock().expect("clock lock poisoned");
        let now = *state;
        *state += self.tick;
        now
    }
}
