//! Both tasks against one console: contention, drop policy, lifetimes.

use std::sync::Arc;
use std::time::Duration;

use radar_presence::app::events::{IndicatorState, SensingEvent};
use radar_presence::app::params;
use radar_presence::config::RadarConfig;
use radar_presence::console::mutex::ConsoleMutex;
use radar_presence::console::task::ConsoleTask;
use radar_presence::console::ui;
use radar_presence::sensing::task::SensingTask;

use crate::mock_hw::{CaptureWriter, ManualClock, MockEngine, MockIndicator, ScriptedInput};

#[test]
fn presence_in_dropped_while_menu_printing_then_out_printed() {
    let engine = MockEngine::new()
        .script(
            4123,
            SensingEvent::PresenceIn {
                timestamp_ms: 4123,
                distance_m: 0.82,
                accuracy_m: 0.05,
            },
        )
        .script(9000, SensingEvent::PresenceOut { timestamp_ms: 9000 });
    let out = CaptureWriter::new();
    let console = Arc::new(ConsoleMutex::new(out.clone()));
    let leds = MockIndicator::new();
    let clock = ManualClock::at(4123);
    let mut sensing = SensingTask::setup(
        &RadarConfig::default(),
        Arc::clone(&console),
        leds.clone(),
        clock.clone(),
        engine.factory(),
    )
    .unwrap();
    let engine = sensing.engine();

    // Console is mid-menu when the engine reports the entry.
    {
        let mut menu = console.lock();
        sensing.step().unwrap();
        assert_eq!(leds.current(), Some(IndicatorState::Present));
        ui::write_menu(
            &mut *menu,
            engine.get_parameter(params::RANGE_MAX),
            engine.get_parameter(params::SENSITIVITY),
        )
        .unwrap();
    }
    assert_eq!(sensing.dropped_lines().get(), 1);
    assert!(!out.text().contains("Presence IN"));

    clock.set(9000);
    sensing.step().unwrap();
    assert_eq!(leds.current(), Some(IndicatorState::Absent));
    assert!(out.text().ends_with("\n9.000: Presence OUT\n"));
    assert_eq!(sensing.dropped_lines().get(), 1);
}

/// Every line the console or the handler can produce, whole.
fn is_whole_line(line: &str) -> bool {
    const FIXED: &[&str] = &[
        ui::MENU_TITLE,
        ui::RANGE_PROMPT,
        ui::SENSITIVITY_PROMPT,
        ui::HELP_HINT,
        ui::RESULT_OK,
        ui::RESULT_ERROR,
        ui::EXIT_NOTICE,
        "'r': Set presence max range (1.0)",
        "'r': Set presence max range (2.0)",
        "'s': Set sensitivity (medium)",
        "'s': Set sensitivity (high)",
        // Echoed values; `lines()` strips the echoed `\r`.
        "2.0",
        "high",
        "",
    ];
    if FIXED.contains(&line) {
        return true;
    }
    let Some((time, rest)) = line.split_once(": ") else {
        return false;
    };
    let time_ok = time.parse::<f64>().is_ok() && time.split_once('.').is_some_and(|(_, f)| f.len() == 3);
    let rest_ok = rest == "Presence OUT" || rest == "Presence IN 0.77-0.87";
    time_ok && rest_ok
}

#[test]
fn concurrent_output_never_interleaves() {
    const STEPS: u64 = 400;

    let engine = MockEngine::new().every_step(|t| {
        if (t / 2) % 2 == 0 {
            SensingEvent::PresenceIn {
                timestamp_ms: t,
                distance_m: 0.82,
                accuracy_m: 0.05,
            }
        } else {
            SensingEvent::PresenceOut { timestamp_ms: t }
        }
    });
    let out = CaptureWriter::slow();
    let console = Arc::new(ConsoleMutex::new(out.clone()));
    let leds = MockIndicator::new();
    let clock = ManualClock::at(0);
    let mut sensing = SensingTask::setup(
        &RadarConfig::default(),
        Arc::clone(&console),
        leds.clone(),
        clock.clone(),
        engine.factory(),
    )
    .unwrap();

    let mut keys = Vec::new();
    for _ in 0..10 {
        keys.extend_from_slice(b"?r2.0\rshigh\rx");
    }
    let terminal = ConsoleTask::new(
        sensing.engine(),
        ScriptedInput::new(&keys),
        Arc::clone(&console),
        Duration::ZERO,
    );

    let dropped = sensing.dropped_lines();
    let sensing_thread = std::thread::spawn(move || {
        for _ in 0..STEPS {
            sensing.step().unwrap();
            clock.advance(2);
            std::thread::yield_now();
        }
    });
    let console_thread = std::thread::spawn(move || terminal.run());

    sensing_thread.join().unwrap();
    console_thread.join().unwrap();

    let text = out.text();
    let bad: Vec<&str> = text.lines().filter(|l| !is_whole_line(l)).collect();
    assert!(bad.is_empty(), "interleaved output: {:?}", bad);

    // Every event either printed or counted as dropped.
    let printed = text.lines().filter(|l| l.contains(": Presence ")).count() as u64;
    assert_eq!(printed + u64::from(dropped.get()), STEPS);

    // Console sequences stay contiguous.
    let lines: Vec<&str> = text.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if *line == ui::RANGE_PROMPT {
            assert_eq!(lines[i + 1], "2.0");
            assert_eq!(lines[i + 2], ui::RESULT_OK);
        }
        if *line == ui::MENU_TITLE {
            assert!(lines[i + 1].starts_with("'r': "));
            assert!(lines[i + 2].starts_with("'s': "));
            assert_eq!(lines[i + 3], "");
        }
    }

    // Exactly one LED lit after the first event, whatever was printed.
    let history = leds.history();
    assert_eq!(history[0], None);
    assert!(history[1..].iter().all(Option::is_some));
    assert_eq!(history.len() as u64, STEPS + 1);
}

#[test]
fn console_exit_leaves_sensing_running() {
    let engine = MockEngine::new().every_step(|t| SensingEvent::PresenceOut { timestamp_ms: t });
    let out = CaptureWriter::new();
    let console = Arc::new(ConsoleMutex::new(out.clone()));
    let clock = ManualClock::at(1000);
    let mut sensing = SensingTask::setup(
        &RadarConfig::default(),
        Arc::clone(&console),
        MockIndicator::new(),
        clock.clone(),
        engine.factory(),
    )
    .unwrap();

    ConsoleTask::new(
        sensing.engine(),
        ScriptedInput::new(b"?"),
        Arc::clone(&console),
        Duration::ZERO,
    )
    .run();
    assert!(out.text().ends_with("Exiting terminal ui\n"));

    sensing.step().unwrap();
    assert!(out.text().ends_with("Exiting terminal ui\n1.000: Presence OUT\n"));
}

#[test]
fn console_parameter_change_is_seen_by_engine() {
    let engine = MockEngine::new();
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

    ConsoleTask::new(
        sensing.engine(),
        ScriptedInput::new(b"slow\r"),
        console,
        Duration::ZERO,
    )
    .run();

    let value = sensing.engine().get_parameter(params::SENSITIVITY).unwrap();
    assert_eq!(value.as_str(), "low");
}
