//! Unified error types for the heater sequence controller.
//!
//! Only two things can stop the controller: bad startup configuration and
//! failing operator input.  Everything that can go wrong with a single input line
//! is a classification outcome, not an error.  Actuator faults are reported
//! through [`ActuatorError`] but the control loop treats them as warnings.

use core::fmt;
use std::io;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configuration value is out of range.  The message is shown to the
    /// operator as-is.
    Config(&'static str),
    /// The command line could not be parsed (rendered usage message).
    Usage(String),
    /// Waiting for or reading operator input failed.
    Input(io::ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "{msg}"),
            Self::Usage(msg) => write!(f, "{}", msg.trim_end()),
            Self::Input(kind) => write!(f, "input failed: {kind}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Input(e.kind())
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The output pin rejected the level change.
    PinWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinWriteFailed => write!(f, "pin write failed"),
        }
    }
}

impl std::error::Error for ActuatorError {}


// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
