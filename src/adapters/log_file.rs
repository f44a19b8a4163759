//! Debug log file.
//!
//! Created in truncate-write mode at startup when debug is on.  A file that
//! cannot be created is reported and the controller runs without a mirror.
//! The file is
//! closed exactly once, when the owning [`Logger`](crate::app::logger::Logger)
//! is dropped, whichever way the process leaves the control loop.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::SystemConfig;

pub struct LogFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl LogFile {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        info!("log file {} opened", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open the debug mirror the config asks for, if any.
pub fn mirror_for(config: &SystemConfig) -> Option<LogFile> {
    if !config.debug {
        return None;
    }
    match LogFile::create(&config.log_file) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!(
                "log file {} unavailable, continuing without it: {e}",
                config.log_file.display()
            );
            None
        }
    }
}

impl Write for LogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for LogFile {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("log file {}: final flush failed: {e}", self.path.display());
        }
        info!("log file {} closed", self.path.display());
    }
}
