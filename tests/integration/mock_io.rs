//! Mock adapters for driving the controller deterministically.
//!
//! The scripted source and the manual clock share one time cell: every
//! wait advances the clock by exactly the time it "slept", so elapsed
//! markers and tick deadlines can be asserted to the millisecond.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use heatseq::app::logger::Logger;
use heatseq::app::ports::{ActuatorPort, LineSource, TimePort, WaitOutcome};
use heatseq::app::sequence::Bit;
use heatseq::app::service::Controller;
use heatseq::config::SystemConfig;
use heatseq::error::ActuatorError;

// ── Manual clock ──────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn advance(&self, secs: f64) {
        self.0.set(self.0.get() + secs);
    }

    pub fn now_secs(&self) -> f64 {
        self.0.get()
    }
}

impl TimePort for ManualClock {
    fn now(&self) -> f64 {
        self.0.get()
    }
}

// ── Scripted line source ──────────────────────────────────────

#[derive(Debug)]
pub enum Input {
    /// Let the whole wait budget expire.
    Idle,
    /// A line that arrives `delay` seconds into the wait.
    Line { delay: f64, bytes: Vec<u8> },
    /// The readiness wait fails.
    Fail(io::ErrorKind),
}

pub fn line(text: &str) -> Input {
    line_after(0.0, text)
}

pub fn line_after(delay: f64, text: &str) -> Input {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(b'\n');
    Input::Line { delay, bytes }
}

/// A final line with no terminator: the stream ends after it.
pub fn unterminated(text: &str) -> Input {
    Input::Line {
        delay: 0.0,
        bytes: text.as_bytes().to_vec(),
    }
}

pub struct ScriptedSource {
    script: VecDeque<Input>,
    current: VecDeque<u8>,
    clock: ManualClock,
    pub waits: Vec<Duration>,
}

impl ScriptedSource {
    pub fn new(clock: ManualClock, script: Vec<Input>) -> Self {
        Self {
            script: script.into(),
            current: VecDeque::new(),
            clock,
            waits: Vec::new(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn wait(&mut self, timeout: Duration) -> WaitOutcome {
        self.waits.push(timeout);
        let budget = timeout.as_secs_f64();
        match self.script.pop_front() {
            // Running off the end of the script stops `run()`.
            None => WaitOutcome::Error(io::ErrorKind::UnexpectedEof.into()),
            Some(Input::Idle) => {
                self.clock.advance(budget);
                WaitOutcome::TimedOut
            }
            Some(Input::Line { delay, bytes }) if delay >= budget => {
                self.clock.advance(budget);
                self.script.push_front(Input::Line {
                    delay: delay - budget,
                    bytes,
                });
                WaitOutcome::TimedOut
            }
            Some(Input::Line { delay, bytes }) => {
                self.clock.advance(delay);
                self.current = bytes.into();
                WaitOutcome::Ready
            }
            Some(Input::Fail(kind)) => WaitOutcome::Error(kind.into()),
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.current.pop_front())
    }
}

// ── Shared output buffer ──────────────────────────────────────

#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Recording actuator ────────────────────────────────────────

#[derive(Default)]
pub struct RecordingActuator {
    pub applied: Vec<Bit>,
    pub broken: bool,
}

impl ActuatorPort for RecordingActuator {
    fn apply(&mut self, bit: Bit) -> Result<(), ActuatorError> {
        self.applied.push(bit);
        if self.broken {
            Err(ActuatorError::PinWriteFailed)
        } else {
            Ok(())
        }
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type TestController = Controller<ScriptedSource, ManualClock, RecordingActuator>;

pub struct Harness {
    pub controller: TestController,
    pub console: SharedBuffer,
    pub mirror: SharedBuffer,
    pub clock: ManualClock,
}

pub fn config(debug: bool, period_secs: f32) -> SystemConfig {
    SystemConfig {
        debug,
        cycle_period_secs: period_secs,
        ..SystemConfig::default()
    }
}

pub fn harness(config: &SystemConfig, script: Vec<Input>) -> Harness {
    harness_with(config, script, RecordingActuator::default())
}

pub fn harness_with(
    config: &SystemConfig,
    script: Vec<Input>,
    actuator: RecordingActuator,
) -> Harness {
    let console = SharedBuffer::default();
    let mirror = SharedBuffer::default();
    let clock = ManualClock::default();
    let logger = Logger::new(Box::new(console.clone()), config.debug)
        .with_mirror(Box::new(mirror.clone()));
    let source = ScriptedSource::new(clock.clone(), script);
    Harness {
        controller: Controller::new(config, logger, source, clock.clone(), actuator),
        console,
        mirror,
        clock,
    }
}
