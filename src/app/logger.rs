//! Gated dual-sink output.
//!
//! Everything the operator sees goes through [`Logger`]:
//!
//! | Call               | Console            | File mirror        |
//! |--------------------|--------------------|--------------------|
//! | `always_visible`   | always             | only in debug mode |
//! | `debug_only`       | only in debug mode | only in debug mode |
//!
//! Callers format before calling.  Writes are best effort: a failing sink
//! is reported on the diagnostic log and otherwise ignored.

use std::io::Write;

use log::debug;

pub struct Logger {
    console: Box<dyn Write>,
    mirror: Option<Box<dyn Write>>,
    debug: bool,
}

impl Logger {
    pub fn new(console: Box<dyn Write>, debug: bool) -> Self {
        Self {
            console,
            mirror: None,
            debug,
        }
    }

    /// Attach the file mirror.  Dropped together with the logger.
    pub fn with_mirror(mut self, mirror: Box<dyn Write>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn always_visible(&mut self, text: &str) {
        self.emit(true, text);
    }

    pub fn debug_only(&mut self, text: &str) {
        self.emit(false, text);
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Flip debug mode and return the new value.
    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    pub fn has_mirror(&self) -> bool {
        self.mirror.is_some()
    }

    fn emit(&mut self, force_visible: bool, text: &str) {
        if force_visible || self.debug {
            if let Err(e) = write_through(&mut *self.console, text) {
                debug!("console write failed: {e}");
            }
        }
        if self.debug {
            if let Some(mirror) = self.mirror.as_deref_mut() {
                if let Err(e) = write_through(mirror, text) {
                    debug!("log mirror write failed: {e}");
                }
            }
        }
    }
}

fn write_through(sink: &mut dyn Write, text: &str) -> std::io::Result<()> {
    sink.write_all(text.as_bytes())?;
    sink.flush()
}
