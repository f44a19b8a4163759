//! Integration test driver for `tests/integration/`.
//!
//! Each `mod` below maps to a file that exercises the controller against
//! mock adapters: scripted input, a manual clock and in-memory sinks.

mod mock_io;
mod wiring_tests;
