//! Monotonic time adapter.
//!
//! Wraps `std::time::Instant` so the control loop sees time as plain
//! seconds since the adapter was created.  `Instant` never goes backwards,
//! which keeps the elapsed-time markers free of wall-clock jumps.

use std::time::Instant;

use crate::app::ports::TimePort;

pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimePort for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
