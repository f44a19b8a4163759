//! Diagnostic `log` backend.
//!
//! Internal diagnostics (log-file lifecycle, wait failures, heater faults)
//! go through the `log` facade and end up on stderr, away from the
//! operator-facing output on stdout.  The level is `Warn` unless
//! `HEATSEQ_TRACE` is set in the environment.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable that raises the diagnostic level to `Debug`.
pub const TRACE_ENV: &str = "HEATSEQ_TRACE";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr().lock(),
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Level selected by the environment.
pub fn level_from_env() -> LevelFilter {
    if std::env::var_os(TRACE_ENV).is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the backend.  Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
