//! Controller: the event loop.
//!
//! [`Controller`] owns the committed plan, the loop-wide [`AppState`] and
//! the cycle driver.  All I/O flows through port traits injected at
//! construction, so the whole loop can be driven with mock adapters.
//!
//! ```text
//!  LineSource ──▶ ┌──────────────────────────┐ ──▶ Logger (console + file)
//!                 │        Controller         │
//!   TimePort  ──▶ │ wait · classify · tick    │ ──▶ ActuatorPort
//!                 └──────────────────────────┘
//! ```
//!
//! One iteration:
//!
//! 1. wait up to `remaining_wait` for input;
//! 2. on input, read and classify exactly one line;
//! 3. if a tick boundary was reached (timeout or fresh commit), reset the
//!    countdown to the full period and let the cycle driver act;
//!    otherwise shrink the countdown by the time spent, so stray input
//!    never pushes the tick deadline back.

use std::time::Duration;

use log::{debug, error, info};

use crate::config::SystemConfig;
use crate::error::Result;

use super::driver::{CycleDriver, TickReport};
use super::logger::Logger;
use super::parser::{LineOutcome, LineScanner, ScanStep};
use super::ports::{ActuatorPort, LineSource, TimePort, WaitOutcome};
use super::sequence::{BitSequence, ControlState, render};

/// Loop-wide mutable context.
pub struct AppState {
    period: Duration,
    remaining_wait: Duration,
    /// Timestamp of the last commit (startup time before the first one).
    sequence_start: f64,
    /// Debug flag and the optional file mirror live in the logger.
    logger: Logger,
}

/// Whether the loop keeps running after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub struct Controller<S, T, A> {
    source: S,
    clock: T,
    driver: CycleDriver<A>,
    control: ControlState,
    app: AppState,
}

impl<S, T, A> Controller<S, T, A>
where
    S: LineSource,
    T: TimePort,
    A: ActuatorPort,
{
    /// Build the controller from a validated config.
    pub fn new(config: &SystemConfig, logger: Logger, source: S, clock: T, actuator: A) -> Self {
        let period = config.period();
        let sequence_start = clock.now();
        Self {
            source,
            clock,
            driver: CycleDriver::new(actuator),
            control: ControlState::new(),
            app: AppState {
                period,
                remaining_wait: period,
                sequence_start,
                logger,
            },
        }
    }

    /// Print the settings banner (debug only).
    pub fn announce(&mut self, config: &SystemConfig) {
        let logger = &mut self.app.logger;
        logger.debug_only("Settings:\n");
        logger.debug_only(&format!(
            "-Cycle period (sec): {:.1} \n",
            config.cycle_period_secs
        ));
        logger.debug_only(&format!("-Log file: {}\n\n", config.log_file.display()));
        logger.debug_only("Type a control sequence (0101001...) and press enter.\n");
    }

    /// Run until a quit line arrives (`Ok`) or input fails (`Err`).
    pub fn run(&mut self) -> Result<()> {
        info!("control loop started, period {:?}", self.app.period);
        while self.step()? == Step::Continue {}
        Ok(())
    }

    /// One loop iteration.
    pub fn step(&mut self) -> Result<Step> {
        let started = self.clock.now();

        let boundary = match self.source.wait(self.app.remaining_wait) {
            WaitOutcome::TimedOut => true,
            WaitOutcome::Ready => match self.read_line()? {
                LineOutcome::Quit => {
                    self.app.logger.debug_only("Quit application\n");
                    info!("quit requested");
                    return Ok(Step::Quit);
                }
                LineOutcome::Command => {
                    let on = self.app.logger.toggle_debug();
                    debug!("debug toggled {}", if on { "on" } else { "off" });
                    false
                }
                LineOutcome::Valid(bits) => {
                    self.commit(bits);
                    true
                }
                LineOutcome::Invalid => {
                    self.app
                        .logger
                        .debug_only("Invalid control sequence received\n");
                    false
                }
            },
            WaitOutcome::Error(e) => {
                self.app
                    .logger
                    .debug_only(&format!("Error: input wait failed ({e})\n"));
                error!("input wait failed: {e}");
                return Err(e.into());
            }
        };

        if boundary {
            self.app.remaining_wait = self.app.period;
            let elapsed = self.clock.now() - self.app.sequence_start;
            let report = self
                .driver
                .on_boundary(&mut self.control, elapsed, &mut self.app.logger);
            if report != TickReport::Silent {
                debug!("tick: {report:?}");
            }
        } else {
            let spent = (self.clock.now() - started).max(0.0);
            self.app.remaining_wait = self
                .app
                .remaining_wait
                .saturating_sub(Duration::from_secs_f64(spent));
        }

        Ok(Step::Continue)
    }

    fn read_line(&mut self) -> Result<LineOutcome> {
        let mut scanner = LineScanner::new();
        while let Some(byte) = self.source.next_byte()? {
            if byte == b'\n' {
                break;
            }
            match scanner.feed(byte) {
                ScanStep::Continue => {}
                ScanStep::BufferFull => self.app.logger.debug_only("Warning: buffer full\n"),
                ScanStep::Quit => return Ok(LineOutcome::Quit),
            }
        }
        Ok(scanner.finish())
    }

    fn commit(&mut self, bits: BitSequence) {
        let logger = &mut self.app.logger;
        if logger.debug() {
            logger.debug_only("New control sequence:\n");
            logger.debug_only(&format!("{}\n", render(&bits)));
        }
        self.control.commit(bits);
        self.app.sequence_start = self.clock.now();
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn control(&self) -> &ControlState {
        &self.control
    }

    pub fn debug(&self) -> bool {
        self.app.logger.debug()
    }

    pub fn remaining_wait(&self) -> Duration {
        self.app.remaining_wait
    }

    pub fn period(&self) -> Duration {
        self.app.period
    }

    pub fn has_log_file(&self) -> bool {
        self.app.logger.has_mirror()
    }

    pub fn actuator(&self) -> &A {
        self.driver.actuator()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
