//! The real adapters wired into the controller the way `main` does it.

use heatseq::adapters::hardware::HeaterAdapter;
use heatseq::adapters::log_file::{self, LogFile};
use heatseq::app::logger::Logger;
use heatseq::app::service::Controller;
use heatseq::drivers::heater::{HeaterDriver, HeaterState, SimulatedPin};
use heatseq::settings::{self, Launch};

use crate::mock_io::{ManualClock, ScriptedSource, SharedBuffer, config, line};

fn heater() -> HeaterAdapter<SimulatedPin> {
    HeaterAdapter::new(HeaterDriver::new(SimulatedPin::new()).unwrap())
}

#[test]
fn log_file_holds_the_debug_stream_after_quit() {
    let path = std::env::temp_dir().join(format!("heatseq-it-{}.log", std::process::id()));
    let cfg = config(true, 2.5);
    let console = SharedBuffer::default();
    let clock = ManualClock::default();
    let logger = Logger::new(Box::new(console.clone()), true)
        .with_mirror(Box::new(LogFile::create(&path).unwrap()));
    let source = ScriptedSource::new(clock.clone(), vec![line("1"), line("q")]);

    let mut controller = Controller::new(&cfg, logger, source, clock, heater());
    assert!(controller.has_log_file());
    controller.run().unwrap();
    drop(controller);

    let logged = std::fs::read_to_string(&path).unwrap();
    assert_eq!(logged, console.contents());
    assert_eq!(
        logged,
        "New control sequence:\n1\n[ON]>0.000\nQuit application\n"
    );
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn unopenable_log_file_runs_without_a_mirror() {
    let mut cfg = config(true, 2.5);
    cfg.log_file = std::env::temp_dir()
        .join(format!("heatseq-missing-{}", std::process::id()))
        .join("log.txt");
    let console = SharedBuffer::default();
    let clock = ManualClock::default();
    let mut logger = Logger::new(Box::new(console.clone()), cfg.debug);
    if let Some(file) = log_file::mirror_for(&cfg) {
        logger = logger.with_mirror(Box::new(file));
    }
    let source = ScriptedSource::new(clock.clone(), vec![line("1"), line("q")]);

    let mut controller = Controller::new(&cfg, logger, source, clock, heater());
    assert!(!controller.has_log_file());
    controller.run().unwrap();

    assert_eq!(
        console.contents(),
        "New control sequence:\n1\n[ON]>0.000\nQuit application\n"
    );
}

#[test]
fn heater_follows_the_played_bits() {
    let script = vec![line("10"), crate::mock_io::Input::Idle, line("q")];
    let clock = ManualClock::default();
    let cfg = config(false, 1.0);
    let logger = Logger::new(Box::new(SharedBuffer::default()), false);
    let source = ScriptedSource::new(clock.clone(), script);

    let mut controller = Controller::new(&cfg, logger, source, clock, heater());
    controller.run().unwrap();

    let heater = controller.actuator().heater();
    assert_eq!(heater.state(), HeaterState::Off);
    assert_eq!(heater.switch_count(), 2);
    assert!(!heater.pin().is_high());
}

#[test]
fn command_line_settings_reach_the_controller() {
    let launch = settings::parse_from(["heatseq", "-d", "0", "-t", "0.5"]).unwrap();
    let Launch::Run { config, show_hint } = launch else {
        panic!("expected a run request");
    };
    assert!(!show_hint);

    let clock = ManualClock::default();
    let logger = Logger::new(Box::new(SharedBuffer::default()), config.debug);
    let source = ScriptedSource::new(clock.clone(), Vec::new());
    let controller = Controller::new(&config, logger, source, clock, heater());

    assert!(!controller.debug());
    assert_eq!(controller.period(), std::time::Duration::from_millis(500));
    assert!(!controller.has_log_file());
}
