//! Port traits: the boundary between the control loop and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! The [`Controller`](super::service::Controller) consumes these through
//! generics, so the loop never touches stdin, the wall clock or the heater
//! pin directly and can be driven deterministically from tests.

use std::io;
use std::time::Duration;

use crate::app::sequence::Bit;
use crate::error::ActuatorError;

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.
pub trait TimePort {
    /// Seconds since an arbitrary fixed origin.  Never decreases.
    fn now(&self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Input port
// ───────────────────────────────────────────────────────────────

/// Result of a bounded wait on the input channel.
#[derive(Debug)]
pub enum WaitOutcome {
    /// Nothing arrived within the budget.
    TimedOut,
    /// At least one byte can be read without blocking.
    Ready,
    /// The readiness wait itself failed.  Fatal for the loop.
    Error(io::Error),
}

/// Line-oriented operator input with a bounded readiness wait.
///
/// This is the only place the control loop may suspend.
pub trait LineSource {
    /// Wait up to `timeout` for input to become readable.
    fn wait(&mut self, timeout: Duration) -> WaitOutcome;

    /// Next byte of the current line.  `Ok(None)` means end of stream.
    ///
    /// Only called after [`wait`](Self::wait) returned
    /// [`WaitOutcome::Ready`]; may block until the rest of a partially
    /// received line arrives.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port
// ───────────────────────────────────────────────────────────────

/// Write-side port: the cycle driver calls this once per played bit.
pub trait ActuatorPort {
    fn apply(&mut self, bit: Bit) -> Result<(), ActuatorError>;
}
