//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter      | Implements    | Connects to                   |
//! |--------------|---------------|-------------------------------|
//! | `hardware`   | ActuatorPort  | Heater driver (OutputPin)     |
//! | `stdin`      | LineSource    | Process stdin via select()    |
//! | `time`       | TimePort      | `std::time::Instant`          |
//! | `log_file`   | `io::Write`   | Debug mirror file             |
//! | `stderr_log` | `log::Log`    | Diagnostics on stderr         |

pub mod hardware;
pub mod log_file;
pub mod stderr_log;
#[cfg(unix)]
pub mod stdin;
pub mod time;
