//! Application core: the control loop and its pure building blocks.
//!
//! Nothing in here touches stdin, the clock or the heater pin directly.
//! All interaction happens through the traits in [`ports`], which keeps
//! the loop testable with scripted input and a manual clock.

pub mod driver;
pub mod logger;
pub mod parser;
pub mod ports;
pub mod sequence;
pub mod service;
