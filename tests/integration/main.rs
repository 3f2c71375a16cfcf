//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one task, or both
//! together, against mock adapters. All tests run on the host with no
//! real hardware required.

mod console_task_tests;
mod scenario_tests;
mod sensing_task_tests;
