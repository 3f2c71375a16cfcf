//! Console task: command protocol against a shared engine.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use radar_presence::config::RadarConfig;
use radar_presence::console::mutex::ConsoleMutex;
use radar_presence::console::task::ConsoleTask;
use radar_presence::sensing::task::SensingTask;

use crate::mock_hw::{
    CaptureWriter, EngineLog, ManualClock, MockEngine, MockIndicator, ScriptedInput,
};

const MENU_AT_BOOT: &str = "Select a setting to configure\n\
                            'r': Set presence max range (1.0)\n\
                            's': Set sensitivity (medium)\n\
                            \n";

/// Set up the sensing side, then run the console over `input` to completion.
fn session(input: ScriptedInput) -> (String, Arc<Mutex<EngineLog>>) {
    let engine = MockEngine::new();
    let log = Arc::clone(&engine.log);
    let out = CaptureWriter::new();
    let console = Arc::new(ConsoleMutex::new(out.clone()));
    let sensing = SensingTask::setup(
        &RadarConfig::default(),
        Arc::clone(&console),
        MockIndicator::new(),
        ManualClock::at(0),
        engine.factory(),
    )
    .unwrap();

    let terminal = ConsoleTask::new(sensing.engine(), input, console, Duration::ZERO);
    let rest = terminal.run();
    assert_eq!(rest.remaining(), 0);
    (out.text(), log)
}

#[test]
fn menu_at_start_shows_initial_values() {
    let (text, _) = session(ScriptedInput::new(b""));
    assert_eq!(text, format!("{MENU_AT_BOOT}Exiting terminal ui\n"));
}

#[test]
fn idle_polls_produce_no_output() {
    let (text, _) = session(ScriptedInput::new(b"").idle_first(5));
    assert_eq!(text, format!("{MENU_AT_BOOT}Exiting terminal ui\n"));
}

#[test]
fn range_accepted_prints_ok_and_reaches_engine() {
    let (text, log) = session(ScriptedInput::new(b"r2.5\r?"));
    assert_eq!(
        text,
        format!(
            "{MENU_AT_BOOT}\
             Enter range [0.66-10.2]m, press enter\n\
             2.5\r\n\
             OK\n\
             Select a setting to configure\n\
             'r': Set presence max range (2.5)\n\
             's': Set sensitivity (medium)\n\
             \n\
             Exiting terminal ui\n"
        )
    );
    let log = log.lock().unwrap();
    let sets = &log.sets;
    assert_eq!(sets.last().map(|(_, v)| v.as_str()), Some("2.5"));
}

#[test]
fn range_rejected_prints_error_and_keeps_value() {
    let (text, _) = session(ScriptedInput::new(b"r11\r?"));
    assert!(text.contains("11\r\nERROR\n"));
    assert!(text.ends_with(
        "'r': Set presence max range (1.0)\n's': Set sensitivity (medium)\n\nExiting terminal ui\n"
    ));
}

#[test]
fn sensitivity_with_spaces_is_accepted() {
    let (text, log) = session(ScriptedInput::new(b"s  high \r"));
    assert!(text.contains("Set Sensitivity: 'high', 'medium' or 'low'\n  high \r\nOK\n"));
    let log = log.lock().unwrap();
    let sets = &log.sets;
    assert_eq!(
        sets.last(),
        Some(&(
            radar_presence::app::params::SENSITIVITY.to_owned(),
            "high".to_owned()
        ))
    );
}

#[test]
fn empty_value_is_an_error() {
    let (text, _) = session(ScriptedInput::new(b"s\r"));
    assert!(text.contains("\r\nERROR\n"));
}

#[test]
fn unknown_keys_print_hint_each_time() {
    let (text, _) = session(ScriptedInput::new(b"xR"));
    let hint = "Press '?' to list all radar presence settings\n";
    assert_eq!(text.matches(hint).count(), 2);
}

#[test]
fn overlong_value_is_truncated_then_rejected() {
    let mut keys = vec![b'r'];
    keys.extend(std::iter::repeat_n(b'9', 300));
    keys.push(b'\r');
    let input = ScriptedInput::new(&keys);
    let engine = MockEngine::new();
    let log = Arc::clone(&engine.log);
    let out = CaptureWriter::new();
    let console = Arc::new(ConsoleMutex::new(out.clone()));
    let sensing = SensingTask::setup(
        &RadarConfig::default(),
        Arc::clone(&console),
        MockIndicator::new(),
        ManualClock::at(0),
        engine.factory(),
    )
    .unwrap();

    let rest = ConsoleTask::new(sensing.engine(), input, console, Duration::ZERO).run();

    // 255 bytes read as the value; the other 45 and the Enter become keys.
    assert_eq!(rest.remaining(), 0);
    let log = log.lock().unwrap();
    let sets = &log.sets;
    assert_eq!(sets.last().map(|(_, v)| v.len()), Some(255));
    let text = out.text();
    assert!(text.contains("ERROR\n"));
    assert_eq!(
        text.matches("Press '?' to list all radar presence settings\n").count(),
        46
    );
}
