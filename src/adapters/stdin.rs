//! Standard-input line source.
//!
//! Implements [`LineSource`] on top of the `async-io-mini` select()-based
//! reactor: a bounded wait is a race between stdin readability and a
//! reactor timer, driven to completion with `futures_lite::future::block_on`.
//!
//! ```text
//!  wait(budget) ──▶ bytes already buffered? ──yes──▶ Ready
//!                        │ no
//!                        ▼
//!                 stdin closed? ──yes──▶ sleep(budget) ──▶ TimedOut
//!                        │ no
//!                        ▼
//!            race(readable, Timer::after(budget))
//!               readable ──▶ read what is there ──▶ loop
//!               timer    ──▶ TimedOut
//! ```
//!
//! Reads go straight to a duplicate of fd 0 (no std buffering), and bytes
//! beyond the current line stay in `pending` for the next iteration, so a
//! burst of pasted lines is never lost behind a select() that only looks at
//! the kernel buffer.
//!
//! Once stdin reaches end of stream every wait simply sleeps out its budget:
//! the committed pattern keeps playing until the process is stopped.
//!
//! Registering with the reactor puts the shared file description into
//! non-blocking mode.  The original status flags are put back on drop so
//! the shell (or the next process in a pipeline) sees stdin as it left it.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsFd, OwnedFd};
use std::time::{Duration, Instant};

use async_io_mini::{Async, Timer};
// Links the std time driver behind `Timer`.
use embassy_time as _;
use futures_lite::future;
use log::{debug, info, warn};
use nix::fcntl::{FcntlArg, OFlag, fcntl};

use crate::app::ports::{LineSource, WaitOutcome};

const READ_CHUNK: usize = 256;

pub struct StdinSource {
    io: Async<File>,
    pending: VecDeque<u8>,
    closed: bool,
    saved_flags: OFlag,
}

impl StdinSource {
    /// Register a duplicate of the process stdin with the reactor.
    pub fn new() -> io::Result<Self> {
        Self::from_fd(io::stdin().as_fd().try_clone_to_owned()?)
    }

    /// Read lines from any readable descriptor (pipe, socket, tty).
    pub fn from_fd(fd: OwnedFd) -> io::Result<Self> {
        let saved_flags = OFlag::from_bits_truncate(fcntl(fd.as_fd(), FcntlArg::F_GETFL)?);
        Ok(Self {
            io: Async::new(File::from(fd))?,
            pending: VecDeque::new(),
            closed: false,
            saved_flags,
        })
    }

    /// Race readability against the budget.  `Ok(true)` when readable.
    fn race(&self, budget: Duration) -> io::Result<bool> {
        let io = &self.io;
        let readable = async { io.readable().await.map(|()| true) };
        let expired = async {
            Timer::after(budget).await;
            Ok::<_, io::Error>(false)
        };
        future::block_on(future::or(readable, expired))
    }

    /// One non-blocking read into `pending`.
    fn try_fill(&mut self) -> io::Result<()> {
        let mut chunk = [0u8; READ_CHUNK];
        let mut file: &File = self.io.get_ref();
        match file.read(&mut chunk) {
            Ok(0) => {
                self.closed = true;
                info!("stdin reached end of stream");
                Ok(())
            }
            Ok(n) => {
                self.pending.extend(&chunk[..n]);
                Ok(())
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl Drop for StdinSource {
    fn drop(&mut self) {
        let fd = self.io.get_ref().as_fd();
        if let Err(e) = fcntl(fd, FcntlArg::F_SETFL(self.saved_flags)) {
            warn!("stdin: could not restore file status flags: {e}");
        }
    }
}

impl LineSource for StdinSource {
    fn wait(&mut self, timeout: Duration) -> WaitOutcome {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.pending.is_empty() {
                return WaitOutcome::Ready;
            }
            let budget = deadline.saturating_duration_since(Instant::now());
            if self.closed {
                future::block_on(Timer::after(budget));
                return WaitOutcome::TimedOut;
            }
            match self.race(budget) {
                Ok(true) => {
                    if let Err(e) = self.try_fill() {
                        return WaitOutcome::Error(e);
                    }
                }
                Ok(false) => return WaitOutcome::TimedOut,
                Err(e) => return WaitOutcome::Error(e),
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        // Block for the rest of a partially received line.
        while self.pending.is_empty() && !self.closed {
            self.try_fill()?;
            if self.pending.is_empty() && !self.closed {
                debug!("stdin: waiting for the rest of the line");
                future::block_on(self.io.readable())?;
            }
        }
        Ok(self.pending.pop_front())
    }
}
