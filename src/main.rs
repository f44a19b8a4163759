//! heatseq: heater sequence controller, main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  StdinSource     MonotonicClock   HeaterAdapter    LogFile   │
//! │  (LineSource)    (TimePort)       (ActuatorPort)   (mirror)  │
//! │                                                              │
//! │  ───────────────── Port Trait Boundary ─────────────────     │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │           Controller (pure logic)                      │  │
//! │  │  classify · commit · cycle driver · tick countdown     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use heatseq::Error;
use heatseq::adapters::hardware::HeaterAdapter;
use heatseq::adapters::log_file;
use heatseq::adapters::stderr_log;
use heatseq::adapters::stdin::StdinSource;
use heatseq::adapters::time::MonotonicClock;
use heatseq::app::logger::Logger;
use heatseq::app::service::Controller;
use heatseq::drivers::heater::{HeaterDriver, SimulatedPin};
use heatseq::settings::{self, Launch};

// ── Main ──────────────────────────────────────────────────────

fn main() -> ExitCode {
    if let Err(e) = stderr_log::init(stderr_log::level_from_env()) {
        eprintln!("diagnostic logger unavailable: {e}");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<Error>() {
                // Operator-facing messages go to stdout untouched.
                Some(Error::Config(_) | Error::Usage(_)) => println!("{e}"),
                _ => error!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // ── 1. Settings ───────────────────────────────────────────
    let (config, show_hint) = match settings::parse_from(std::env::args_os())? {
        Launch::Help(text) => {
            print!("{text}");
            return Ok(());
        }
        Launch::Run { config, show_hint } => (config, show_hint),
    };
    if show_hint {
        print!("\nUse -h for help\n\n");
    }
    match serde_json::to_string(&config) {
        Ok(json) => debug!("config: {json}"),
        Err(e) => warn!("config not serialisable: {e}"),
    }

    // ── 2. Output sinks ───────────────────────────────────────
    let mut logger = Logger::new(Box::new(io::stdout()), config.debug);
    if let Some(file) = log_file::mirror_for(&config) {
        logger = logger.with_mirror(Box::new(file));
    }

    // ── 3. Adapters ───────────────────────────────────────────
    let source = StdinSource::new().context("cannot watch stdin")?;
    let clock = MonotonicClock::new();
    let heater = HeaterDriver::new(SimulatedPin::new()).context("heater init")?;
    let actuator = HeaterAdapter::new(heater);

    // ── 4. Control loop ───────────────────────────────────────
    let mut controller = Controller::new(&config, logger, source, clock, actuator);
    controller.announce(&config);
    controller.run()?;

    info!(
        "heater switched {} times",
        controller.actuator().heater().switch_count()
    );
    Ok(())
}
