//! Hardware adapter.
//!
//! Bridges the heater driver to the control loop through [`ActuatorPort`].
//! This is the only module that decides what a played bit means for the
//! output pin.

use embedded_hal::digital::OutputPin;

use crate::app::ports::ActuatorPort;
use crate::app::sequence::Bit;
use crate::drivers::heater::{HeaterDriver, HeaterState};
use crate::error::ActuatorError;

pub struct HeaterAdapter<P> {
    heater: HeaterDriver<P>,
}

impl<P: OutputPin> HeaterAdapter<P> {
    pub fn new(heater: HeaterDriver<P>) -> Self {
        Self { heater }
    }

    pub fn heater(&self) -> &HeaterDriver<P> {
        &self.heater
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for HeaterAdapter<P> {
    fn apply(&mut self, bit: Bit) -> Result<(), ActuatorError> {
        let state = match bit {
            Bit::On => HeaterState::On,
            Bit::Off => HeaterState::Off,
        };
        self.heater.set(state)
    }
}
