//! Radar presence firmware library.
//!
//! Exposes every task and port so the integration tests can drive them
//! with mocks. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod pins;
pub mod sensing;

pub mod adapters;
pub mod drivers;
