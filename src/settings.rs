//! Command-line settings.
//!
//! Turns the process arguments into a validated [`SystemConfig`] or a help
//! request.  Option letters:
//!
//! | Flag            | Meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `-h`            | help                                      |
//! | `-d <1/0>`      | debug on / off                            |
//! | `-t <sec>`      | cycle period, `0 < t < 3600`              |
//! | `-l <filename>` | debug log file                            |

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, FromArgMatches, Parser};
use log::warn;

use crate::app::sequence::LINE_LIMIT;
use crate::config::{DEFAULT_LOG_FILE, DEFAULT_PERIOD_SECS, SystemConfig, period_in_range};
use crate::error::{Error, Result};

/// Raw command-line arguments, validated by [`parse_from`].
#[derive(Parser, Debug)]
#[command(
    name = "heatseq",
    about = "Simple heater controller",
    disable_version_flag = true,
    after_help = runtime_help()
)]
struct SettingsArgs {
    /// Activate or deactivate debug
    #[arg(short = 'd', value_name = "1/0")]
    debug: Option<String>,

    /// Set heater cycle period in seconds (max: 3600.0 sec)
    #[arg(short = 't', value_name = "sec", allow_negative_numbers = true)]
    period: Option<String>,

    /// Set log filename
    #[arg(short = 'l', value_name = "filename")]
    log_file: Option<String>,
}

/// What the process should do after reading its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Launch {
    /// Start the control loop.  `show_hint` is set when debug is on and no
    /// arguments were given.
    Run { config: SystemConfig, show_hint: bool },
    /// Print the rendered help text and exit successfully.
    Help(String),
}

/// Parse process arguments (including the program name).
pub fn parse_from<I, T>(args: I) -> Result<Launch>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let no_arguments = args.len() <= 1;

    let parsed = match parse_args(args)? {
        Parsed::Args(parsed) => parsed,
        Parsed::Help(text) => return Ok(Launch::Help(text)),
    };

    let mut config = SystemConfig::default();

    if let Some(raw) = parsed.debug.as_deref() {
        config.debug = parse_debug(raw)?;
    }
    if let Some(raw) = parsed.period.as_deref() {
        config.cycle_period_secs = parse_period(raw)?;
    }
    if let Some(path) = parsed.log_file {
        config.log_file = PathBuf::from(path);
    }
    config.validate()?;

    Ok(Launch::Run {
        show_hint: config.debug && no_arguments,
        config,
    })
}

enum Parsed {
    Args(SettingsArgs),
    Help(String),
}

/// Parse like getopt: unknown options are reported and skipped.
fn parse_args(mut args: Vec<OsString>) -> Result<Parsed> {
    loop {
        match SettingsArgs::try_parse_from(&args) {
            Ok(parsed) => return Ok(Parsed::Args(parsed)),
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                return Ok(Parsed::Help(e.render().to_string()));
            }
            Err(e) => {
                warn!("{}", first_line(&e.render().to_string()));
                match unknown_position(&e, &args) {
                    Some(pos) => {
                        args.remove(pos);
                    }
                    // Missing value: keep whatever parsed before it.
                    None => return parse_lenient(&args).map(Parsed::Args),
                }
            }
        }
    }
}

fn unknown_position(e: &clap::Error, args: &[OsString]) -> Option<usize> {
    if e.kind() != ErrorKind::UnknownArgument {
        return None;
    }
    let Some(ContextValue::String(arg)) = e.get(ContextKind::InvalidArg) else {
        return None;
    };
    args.iter()
        .skip(1)
        .position(|a| a == arg.as_str())
        .map(|i| i + 1)
}

fn parse_lenient(args: &[OsString]) -> Result<SettingsArgs> {
    let matches = SettingsArgs::command()
        .ignore_errors(true)
        .try_get_matches_from(args)
        .map_err(|e| Error::Usage(e.render().to_string()))?;
    SettingsArgs::from_arg_matches(&matches).map_err(|e| Error::Usage(e.render().to_string()))
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

/// Only the first character decides.
fn parse_debug(raw: &str) -> Result<bool> {
    match raw.chars().next() {
        Some('0') => Ok(false),
        Some('1') => Ok(true),
        _ => Err(Error::Config("Invalid -d value. Use -h for help")),
    }
}

fn parse_period(raw: &str) -> Result<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|p| period_in_range(*p))
        .ok_or(Error::Config("Invalid period value. Use -h for help"))
}

fn runtime_help() -> String {
    format!(
        "Default cycle period: {DEFAULT_PERIOD_SECS:.1} sec\n\
         Default log filename: {DEFAULT_LOG_FILE}\n\
         \n\
         While executing:\n\
         q                  quit\n\
         d                  toggle debug. Logging starts only in debug mode\n\
         01010              binary string of arbitrary length to set the heater sequence.\n\
         \n\
         NOTE: max length of the sequence input buffer = {LINE_LIMIT} chars.\n\
         \x20     The sequence beyond the max length will be ignored"
    )
}
