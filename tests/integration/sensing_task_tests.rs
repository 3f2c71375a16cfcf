//! Sensing task: startup sequence, event handling and fault paths.

use std::sync::Arc;

use radar_presence::app::events::{IndicatorState, SensingEvent};
use radar_presence::app::params;
use radar_presence::app::ports::{EngineError, EventMask};
use radar_presence::config::RadarConfig;
use radar_presence::console::mutex::ConsoleMutex;
use radar_presence::error::Error;
use radar_presence::sensing::task::SensingTask;

use crate::mock_hw::{CaptureWriter, ManualClock, MockEngine, MockIndicator};

type Task = SensingTask<MockEngine, ManualClock, CaptureWriter>;

fn setup(engine: MockEngine, clock: &ManualClock) -> (Task, MockIndicator, CaptureWriter) {
    let out = CaptureWriter::new();
    let leds = MockIndicator::new();
    let task = SensingTask::setup(
        &RadarConfig::default(),
        Arc::new(ConsoleMutex::new(out.clone())),
        leds.clone(),
        clock.clone(),
        engine.factory(),
    )
    .unwrap();
    (task, leds, out)
}

#[test]
fn startup_sequence() {
    let engine = MockEngine::new();
    let log = Arc::clone(&engine.log);
    let (_task, leds, out) = setup(engine, &ManualClock::at(0));

    let log = log.lock().unwrap();
    assert_eq!(log.mask, Some(EventMask::PRESENCE));
    assert!(log.enabled);
    assert_eq!(
        log.sets,
        vec![
            (params::RANGE_MAX.to_owned(), "1.0".to_owned()),
            (params::SENSITIVITY.to_owned(), "medium".to_owned()),
        ]
    );
    assert_eq!(leds.history(), vec![None], "LEDs start at the off baseline");
    assert!(out.text().is_empty());
}

#[test]
fn engine_handle_reads_initial_parameters() {
    let (task, _, _) = setup(MockEngine::new(), &ManualClock::at(0));
    let engine = task.engine();
    assert_eq!(engine.get_parameter(params::RANGE_MAX).unwrap().as_str(), "1.0");
    assert_eq!(engine.get_parameter(params::SENSITIVITY).unwrap().as_str(), "medium");
}

#[test]
fn presence_events_drive_leds_and_status_lines() {
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
    let clock = ManualClock::at(4123);
    let (mut task, leds, out) = setup(engine, &clock);

    task.step().unwrap();
    assert_eq!(leds.current(), Some(IndicatorState::Present));

    clock.set(9000);
    task.step().unwrap();
    assert_eq!(leds.current(), Some(IndicatorState::Absent));

    assert_eq!(out.text(), "4.123: Presence IN 0.77-0.87\n9.000: Presence OUT\n");
    assert_eq!(task.dropped_lines().get(), 0);
}

#[test]
fn process_receives_clock_time() {
    let engine = MockEngine::new();
    let log = Arc::clone(&engine.log);
    let clock = ManualClock::at(100);
    let (mut task, _, _) = setup(engine, &clock);

    task.step().unwrap();
    clock.advance(2);
    task.step().unwrap();
    clock.advance(2);
    task.step().unwrap();

    assert_eq!(log.lock().unwrap().processed, vec![100, 102, 104]);
}

#[test]
fn counter_events_are_ignored() {
    let engine = MockEngine::new().script(
        0,
        SensingEvent::CounterIn {
            timestamp_ms: 0,
            count: 3,
        },
    );
    let (mut task, leds, out) = setup(engine, &ManualClock::at(0));
    task.step().unwrap();
    assert_eq!(leds.history(), vec![None]);
    assert!(out.text().is_empty());
}

#[test]
fn init_failure_is_reported_and_fatal() {
    let out = CaptureWriter::new();
    let result: Result<Task, Error> = SensingTask::setup(
        &RadarConfig::default(),
        Arc::new(ConsoleMutex::new(out.clone())),
        MockIndicator::new(),
        ManualClock::at(0),
        |_, _| Err(EngineError::Hardware),
    );
    assert!(matches!(result, Err(Error::Engine(EngineError::Hardware))));
    assert_eq!(
        out.text(),
        "Radar sensing init error - radar board not connected?\n"
    );
}

#[test]
fn process_failure_ends_run_with_message() {
    let engine = MockEngine::new().fail_process_at(0);
    let (task, _, out) = setup(engine, &ManualClock::at(0));

    let Err(e) = task.run();
    assert_eq!(e, Error::Engine(EngineError::Hardware));
    assert_eq!(out.text(), "Radar sensing process error\n");
}
