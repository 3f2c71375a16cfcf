//! Fuzz target: full console session against the simulated engine
//!
//! Arbitrary keystrokes drive `ConsoleTask::run` to end-of-input. The
//! session must terminate, print the exit notice last, and leave the
//! engine with parameter values it would accept again.
//!
//! cargo fuzz run fuzz_console_session

#![no_main]

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use radar_presence::adapters::sim_engine::SimulatedEngine;
use radar_presence::app::params::{parse_range_max, Sensitivity, RANGE_MAX, SENSITIVITY};
use radar_presence::app::ports::{CharInput, CharOutput, EventMask, RxPoll};
use radar_presence::console::mutex::ConsoleMutex;
use radar_presence::console::task::ConsoleTask;
use radar_presence::drivers::hw_init::{init_radar_transport, RadarHwConfig};
use radar_presence::sensing::engine::EngineHandle;

struct Bytes(VecDeque<u8>);

impl CharInput for Bytes {
    fn poll_byte(&mut self) -> RxPoll {
        self.0.pop_front().map_or(RxPoll::Closed, RxPoll::Byte)
    }
    fn read_byte(&mut self) -> Option<u8> {
        self.0.pop_front()
    }
}

struct Screen(Vec<u8>);

impl fmt::Write for Screen {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

impl CharOutput for Screen {
    fn write_byte(&mut self, byte: u8) -> fmt::Result {
        self.0.push(byte);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(transport) = init_radar_transport(&RadarHwConfig::board(25_000_000)) else {
        return;
    };
    let Ok(engine) = SimulatedEngine::new(transport, EventMask::PRESENCE) else {
        return;
    };
    let engine = EngineHandle::new(engine);
    let console = Arc::new(ConsoleMutex::new(Screen(Vec::new())));

    let task = ConsoleTask::new(
        engine.clone(),
        Bytes(data.iter().copied().collect()),
        Arc::clone(&console),
        Duration::ZERO,
    );
    let rest = task.run();
    assert!(rest.0.is_empty());

    let out = console.lock();
    assert!(out.0.ends_with(b"Exiting terminal ui\n"));

    let range = engine.get_parameter(RANGE_MAX).unwrap();
    assert!(parse_range_max(&range).is_some());
    let sensitivity = engine.get_parameter(SENSITIVITY).unwrap();
    assert!(sensitivity.parse::<Sensitivity>().is_ok());
});
