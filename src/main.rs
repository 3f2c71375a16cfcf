//! Radar Presence Firmware: main entry point
//!
//! Two tasks share one operator channel through the console mutex.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  main: logger · console UART · LEDs · ConsoleMutex · banner  │
//! │        SensingTask::setup (engine, handler, params, enable)  │
//! │                                                              │
//! │  ┌──────────────────────────┐   ┌─────────────────────────┐  │
//! │  │ RADAR PRESENCE TASK      │   │ RADAR PRESENCE          │  │
//! │  │ process(now) every 2 ms  │   │ TERMINAL UI             │  │
//! │  │ handler: LEDs, try_lock  │   │ keys → lock → get/set   │  │
//! │  └────────────┬─────────────┘   └───────────┬─────────────┘  │
//! │               └────── ConsoleMutex ─────────┘                │
//! │                            │                                 │
//! │                     UART / stdout                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::fmt::Display;
use std::sync::Arc;

use anyhow::Result;
use log::{error, info};

use radar_presence::adapters::console_io;
use radar_presence::adapters::sim_engine::SimulatedEngine;
use radar_presence::adapters::time::MonotonicClock;
use radar_presence::config::{RadarConfig, CONSOLE_TASK, SENSING_TASK};
use radar_presence::console::mutex::ConsoleMutex;
use radar_presence::console::task::ConsoleTask;
use radar_presence::console::ui;
use radar_presence::drivers::gpio::GpioOutput;
use radar_presence::drivers::hw_init;
use radar_presence::drivers::indicator::PresenceIndicator;
use radar_presence::drivers::task_pin::spawn_task;
use radar_presence::pins;
use radar_presence::sensing::task::SensingTask;

fn main() -> Result<()> {
    // ── 1. Bootstrap + logging ────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Radar presence v{}", env!("CARGO_PKG_VERSION"));
    let config = RadarConfig::default();

    // ── 2. Console channel + indicator pins ───────────────────
    if let Err(e) = hw_init::init_console_uart().and_then(|()| hw_init::init_indicator_outputs()) {
        fatal("hardware init", &e);
    }

    #[cfg(target_os = "espidf")]
    let (output, input) = (console_io::UartOutput, console_io::UartInput);
    #[cfg(not(target_os = "espidf"))]
    let (output, input) = (console_io::StdoutOutput, console_io::StdinInput::spawn()?);

    let console = Arc::new(ConsoleMutex::new(output));
    ui::show_banner(&*console);

    // ── 3. Sensing setup (fatal on any failure) ───────────────
    let indicator = PresenceIndicator::new(
        GpioOutput::new(pins::LED_R_GPIO),
        GpioOutput::new(pins::LED_G_GPIO),
    );
    let sensing = match SensingTask::setup(
        &config,
        Arc::clone(&console),
        indicator,
        MonotonicClock::new(),
        SimulatedEngine::new,
    ) {
        Ok(task) => task,
        Err(e) => fatal("sensing setup", &e),
    };

    let terminal = ConsoleTask::new(
        sensing.engine(),
        input,
        Arc::clone(&console),
        config.console_idle_poll(),
    );

    // ── 4. Tasks ──────────────────────────────────────────────
    let sensing = spawn_task(&SENSING_TASK, move || {
        let Err(e) = sensing.run();
        fatal("sensing", &e);
    })?;

    // Ends on its own at end-of-input; sensing carries on.
    spawn_task(&CONSOLE_TASK, move || {
        terminal.run();
    })?;

    info!("System ready.");

    if sensing.join().is_err() {
        fatal("sensing", &"task panicked");
    }
    Ok(())
}

/// Log and reset. There is no degraded mode.
fn fatal(what: &str, e: &dyn Display) -> ! {
    error!("{} failed: {}, aborting", what, e);
    std::process::abort()
}
