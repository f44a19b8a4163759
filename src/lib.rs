//! Heater sequence controller library.
//!
//! Exposes the control loop, its ports and the concrete adapters so the
//! binary stays a thin wiring layer and the loop can be driven from tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod settings;

pub use error::{Error, Result};
