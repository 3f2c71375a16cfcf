//! Operator-facing text.
//!
//! The `write_*` functions write to an already-locked output; callers hold
//! the [`ConsoleMutex`] for the whole sequence.

use core::fmt::{self, Write};

use crate::app::params::ParamValue;
use crate::app::ports::EngineError;
use crate::console::mutex::ConsoleMutex;

pub const MENU_TITLE: &str = "Select a setting to configure";
pub const RANGE_PROMPT: &str = "Enter range [0.66-10.2]m, press enter";
pub const SENSITIVITY_PROMPT: &str = "Set Sensitivity: 'high', 'medium' or 'low'";
pub const HELP_HINT: &str = "Press '?' to list all radar presence settings";
pub const RESULT_OK: &str = "OK";
pub const RESULT_ERROR: &str = "ERROR";
pub const EXIT_NOTICE: &str = "Exiting terminal ui";
pub const ENGINE_INIT_ERROR: &str = "Radar sensing init error - radar board not connected?";
pub const ENGINE_PROCESS_ERROR: &str = "Radar sensing process error";

/// Shown in the menu when a parameter cannot be read back.
pub const VALUE_UNAVAILABLE: &str = "n/a";

const RULE: &str = "============================================================";

/// Parameter menu with the engine's current values, plus a blank line.
pub fn write_menu(
    out: &mut impl Write,
    range_max: Result<ParamValue, EngineError>,
    sensitivity: Result<ParamValue, EngineError>,
) -> fmt::Result {
    writeln!(out, "{}", MENU_TITLE)?;
    writeln!(
        out,
        "'r': Set presence max range ({})",
        display_value(range_max.as_ref())
    )?;
    writeln!(
        out,
        "'s': Set sensitivity ({})",
        display_value(sensitivity.as_ref())
    )?;
    writeln!(out)
}

fn display_value<'a>(value: Result<&'a ParamValue, &EngineError>) -> &'a str {
    value.map_or(VALUE_UNAVAILABLE, |v| v.as_str())
}

/// `OK` for success, `ERROR` for anything else. No detail is shown.
pub fn write_result(out: &mut impl Write, result: Result<(), EngineError>) -> fmt::Result {
    let text = match result {
        Ok(()) => RESULT_OK,
        Err(_) => RESULT_ERROR,
    };
    writeln!(out, "{}", text)
}

/// Clear-screen escape and title block printed once at boot.
pub fn write_banner(out: &mut impl Write) -> fmt::Result {
    out.write_str("\x1b[2J\x1b[;H")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Connected Sensor Kit: Radar Presence Application")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

/// Lock the console and print the boot banner. A failed write is logged;
/// boot continues without it.
pub fn show_banner<W: Write>(console: &ConsoleMutex<W>) {
    if let Err(e) = write_banner(&mut *console.lock()) {
        log::warn!("console: banner write failed: {}", e);
    }
}
