//! System configuration parameters
//!
//! The three effective settings of the controller.  Produced by the
//! command-line layer in [`crate::settings`] and fixed for the lifetime of
//! the control loop.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Debug output is on unless the operator turns it off.
pub const DEFAULT_DEBUG: bool = true;
/// Heater cycle period in seconds.
pub const DEFAULT_PERIOD_SECS: f32 = 2.5;
/// Exclusive upper bound on the cycle period in seconds.
pub const MAX_PERIOD_SECS: f32 = 3600.0;
/// Log file written while debug is enabled.
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Start in debug mode (verbose console + file mirror)
    pub debug: bool,
    /// Tick period in seconds, `0 < p < MAX_PERIOD_SECS`
    pub cycle_period_secs: f32,
    /// Destination of the debug log mirror
    pub log_file: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            debug: DEFAULT_DEBUG,
            cycle_period_secs: DEFAULT_PERIOD_SECS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl SystemConfig {
    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !period_in_range(self.cycle_period_secs) {
            return Err(Error::Config("Invalid period value. Use -h for help"));
        }
        Ok(())
    }

    /// The tick period as a `Duration`.
    ///
    /// Only meaningful on a validated config.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f32(self.cycle_period_secs)
    }
}

/// `true` when `secs` is a usable cycle period.
pub fn period_in_range(secs: f32) -> bool {
    secs > 0.0 && secs < MAX_PERIOD_SECS
}
