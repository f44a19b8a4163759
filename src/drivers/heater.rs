//! Heater element driver.
//!
//! A single digital output: high switches the element on, low switches it
//! off.  Generic over any `embedded-hal` 1.0 [`OutputPin`] so the same
//! driver runs against a relay GPIO or the in-memory [`SimulatedPin`].
//!
//! The driver only records a new state after the pin write succeeded, so
//! [`HeaterDriver::state`] never claims a level the pin does not have.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::debug;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterState {
    Off,
    On,
}

pub struct HeaterDriver<P> {
    pin: P,
    state: HeaterState,
    switches: u32,
}

impl<P: OutputPin> HeaterDriver<P> {
    /// Take ownership of the pin and drive it low.
    pub fn new(mut pin: P) -> Result<Self, ActuatorError> {
        pin.set_low().map_err(|_| ActuatorError::PinWriteFailed)?;
        Ok(Self {
            pin,
            state: HeaterState::Off,
            switches: 0,
        })
    }

    pub fn set(&mut self, state: HeaterState) -> Result<(), ActuatorError> {
        let written = match state {
            HeaterState::On => self.pin.set_high(),
            HeaterState::Off => self.pin.set_low(),
        };
        written.map_err(|_| ActuatorError::PinWriteFailed)?;

        if state != self.state {
            self.switches = self.switches.saturating_add(1);
            debug!("heater {:?} -> {:?}", self.state, state);
        }
        self.state = state;
        Ok(())
    }

    pub fn state(&self) -> HeaterState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == HeaterState::On
    }

    /// Number of level changes since construction.
    pub fn switch_count(&self) -> u32 {
        self.switches
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

// ── Simulation ────────────────────────────────────────────────

/// In-memory output pin for hosts without a heater relay.
#[derive(Debug, Default)]
pub struct SimulatedPin {
    high: bool,
}

impl SimulatedPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for SimulatedPin {
    type Error = Infallible;
}

impl OutputPin for SimulatedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}
