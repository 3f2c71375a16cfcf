//! Radar sensing: the shared engine handle, the presence event handler,
//! and the task that drives the processing loop.

pub mod engine;
pub mod reporter;
pub mod task;
