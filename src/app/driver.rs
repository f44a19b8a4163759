//! Cycle driver: plays one bit of the committed plan per tick boundary.
//!
//! ```text
//!  slot()      action                                   cursor
//!  ─────────   ──────────────────────────────────────   ─────────────
//!  Play(bit)   "[ON]"/"[OFF]" (+ "\n" outside debug),   cursor + 1
//!              heater set to bit
//!  Exhausted   "No input sequence." (debug only)        len + 1
//!  Silent      nothing                                  unchanged
//! ```
//!
//! Every boundary ends with the elapsed-time marker `>S.SSS`, measured
//! from the moment the current sequence was committed.
//!
//! The driver goes quiet after announcing idle once and stays quiet until
//! the next commit.  That is long-standing observable behaviour of the
//! tool and is kept as-is.

use log::warn;

use super::logger::Logger;
use super::ports::ActuatorPort;
use super::sequence::{Bit, ControlState, Slot};

/// What happened on a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReport {
    Played(Bit),
    Idle,
    Silent,
}

pub struct CycleDriver<A> {
    actuator: A,
}

impl<A: ActuatorPort> CycleDriver<A> {
    pub fn new(actuator: A) -> Self {
        Self { actuator }
    }

    /// Act on a reached tick boundary.
    pub fn on_boundary(
        &mut self,
        control: &mut ControlState,
        elapsed_secs: f64,
        logger: &mut Logger,
    ) -> TickReport {
        let report = match control.slot() {
            Slot::Exhausted => {
                logger.debug_only("No input sequence.\n");
                control.advance();
                TickReport::Idle
            }
            Slot::Play(bit) => {
                logger.always_visible(bit.marker());
                if !logger.debug() {
                    logger.always_visible("\n");
                }
                if let Err(e) = self.actuator.apply(bit) {
                    warn!("heater: {e} while applying {bit:?}");
                }
                control.advance();
                TickReport::Played(bit)
            }
            Slot::Silent => TickReport::Silent,
        };

        logger.debug_only(&format!(">{elapsed_secs:.3}\n"));
        report
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }
}
