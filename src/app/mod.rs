//! Application core: pure domain types, zero I/O.
//!
//! Presence events, operator commands, engine parameters, and the **port
//! traits** in [`ports`] through which the tasks reach the engine, the LEDs
//! and the operator's input channel.

pub mod commands;
pub mod events;
pub mod params;
pub mod ports;
