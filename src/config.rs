//! System configuration parameters
//!
//! Design constants for the radar presence application. Nothing here is
//! runtime-configurable; the values live in one place so both tasks and the
//! tests agree on them.

use core::ffi::CStr;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::params::Sensitivity;
use crate::drivers::task_pin::Core;

/// Core application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarConfig {
    // --- Sensing ---
    /// Sleep between two engine processing steps (milliseconds)
    pub process_interval_ms: u32,
    /// Radar SPI clock (Hz)
    pub spi_frequency_hz: u32,

    // --- Initial engine parameters ---
    /// Presence range maximum applied at startup (meters)
    pub initial_range_max_m: f32,
    /// Sensitivity applied at startup
    pub initial_sensitivity: Sensitivity,

    // --- Console ---
    /// Sleep when no operator byte is pending (milliseconds)
    pub console_idle_poll_ms: u32,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            process_interval_ms: 2,
            spi_frequency_hz: 25_000_000, // 25 MHz

            initial_range_max_m: 1.0,
            initial_sensitivity: Sensitivity::Medium,

            console_idle_poll_ms: 10,
        }
    }
}

impl RadarConfig {
    pub fn process_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.process_interval_ms))
    }

    pub fn console_idle_poll(&self) -> Duration {
        Duration::from_millis(u64::from(self.console_idle_poll_ms))
    }

    /// Range maximum as the string the engine is given at startup.
    pub fn initial_range_max_value(&self) -> heapless::String<16> {
        use core::fmt::Write;
        let mut s = heapless::String::new();
        let _ = write!(s, "{:.1}", self.initial_range_max_m);
        s
    }
}

// ---------------------------------------------------------------------------
// Task attributes
// ---------------------------------------------------------------------------

/// Scheduling attributes for one application task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskConfig {
    /// FreeRTOS task / host thread name.
    pub name: &'static CStr,
    pub stack_kb: usize,
    /// FreeRTOS priority (higher runs first).
    pub priority: u8,
    pub core: Core,
}

/// Radar processing loop.
pub const SENSING_TASK: TaskConfig = TaskConfig {
    name: c"RADAR PRESENCE TASK",
    stack_kb: 4,
    priority: 5,
    core: Core::App,
};

/// Operator console. Runs below the sensing task.
pub const CONSOLE_TASK: TaskConfig = TaskConfig {
    name: c"RADAR PRESENCE TERMINAL UI",
    stack_kb: 2,
    priority: 4,
    core: Core::Pro,
};
