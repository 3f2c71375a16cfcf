//! Radar sensing task.
//!
//! Brings the engine up once, then calls `process` on a fixed cadence for
//! the life of the device. Any setup or processing failure is returned as
//! fatal; the caller aborts.
//!
//! ```text
//!   setup:  LEDs off ─▶ radar bus ─▶ engine(PRESENCE) ─▶ handler ─▶ range/sensitivity ─▶ enable
//!   run:    loop { process(now_ms) ─▶ handler* ; sleep(interval) }
//! ```

use core::convert::Infallible;
use core::fmt::Write;
use core::time::Duration;
use std::sync::Arc;

use log::{debug, error, info};

use super::engine::EngineHandle;
use super::reporter::{DroppedLines, PresenceReporter};
use crate::app::params;
use crate::app::ports::{ClockPort, EngineError, EventMask, IndicatorPort, SensingEngine};
use crate::config::RadarConfig;
use crate::console::mutex::ConsoleMutex;
use crate::console::ui;
use crate::drivers::hw_init::{self, RadarHwConfig, RadarTransport};
use crate::error::Result;

pub struct SensingTask<E, C, W> {
    engine: EngineHandle<E>,
    clock: C,
    console: Arc<ConsoleMutex<W>>,
    interval: Duration,
    dropped: DroppedLines,
}

impl<E, C, W> SensingTask<E, C, W>
where
    E: SensingEngine,
    C: ClockPort,
    W: Write + Send + 'static,
{
    /// Run the startup sequence and return a task ready to [`run`](Self::run).
    ///
    /// `console` must already exist; `init_engine` constructs the engine
    /// bound to the configured radar bus.
    pub fn setup<L, F>(
        config: &RadarConfig,
        console: Arc<ConsoleMutex<W>>,
        mut indicator: L,
        clock: C,
        init_engine: F,
    ) -> Result<Self>
    where
        L: IndicatorPort + Send + 'static,
        F: FnOnce(RadarTransport, EventMask) -> core::result::Result<E, EngineError>,
    {
        indicator.all_off();

        let transport = hw_init::init_radar_transport(&RadarHwConfig::board(config.spi_frequency_hz))?;

        let mut engine = match init_engine(transport, EventMask::PRESENCE) {
            Ok(engine) => engine,
            Err(e) => {
                report_fault(&console, ui::ENGINE_INIT_ERROR);
                return Err(e.into());
            }
        };

        let reporter = PresenceReporter::new(indicator, Arc::clone(&console));
        let dropped = reporter.dropped_lines();
        engine.register_callback(reporter.into_callback())?;

        engine.set_parameter(params::RANGE_MAX, config.initial_range_max_value().as_bytes())?;
        engine.set_parameter(params::SENSITIVITY, config.initial_sensitivity.as_str().as_bytes())?;
        engine.enable()?;

        info!(
            "sensing: engine enabled (range_max={:.1} m, sensitivity={})",
            config.initial_range_max_m, config.initial_sensitivity
        );

        Ok(Self {
            engine: EngineHandle::new(engine),
            clock,
            console,
            interval: config.process_interval(),
            dropped,
        })
    }

    /// Handle for the console task's parameter calls.
    pub fn engine(&self) -> EngineHandle<E> {
        self.engine.clone()
    }

    pub fn dropped_lines(&self) -> DroppedLines {
        self.dropped.clone()
    }

    /// One processing step at the clock's current time.
    pub fn step(&mut self) -> core::result::Result<(), EngineError> {
        self.engine.process(self.clock.now_ms())
    }

    /// Process forever. Only returns on an engine fault.
    pub fn run(mut self) -> Result<Infallible> {
        info!("sensing: processing every {:?}", self.interval);
        loop {
            if let Err(e) = self.step() {
                report_fault(&self.console, ui::ENGINE_PROCESS_ERROR);
                return Err(e.into());
            }
            std::thread::sleep(self.interval);
        }
    }
}

/// Tell the operator about a fatal engine failure without waiting on the console.
fn report_fault<W: Write>(console: &ConsoleMutex<W>, message: &str) {
    error!("{}", message);
    match console.try_lock() {
        Some(mut out) => {
            let _ = writeln!(out, "{}", message);
        }
        None => debug!("console busy, fault message not printed"),
    }
}
