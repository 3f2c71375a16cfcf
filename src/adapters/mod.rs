//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter      | Implements          | Connects to                    |
//! |--------------|---------------------|--------------------------------|
//! | `console_io` | CharInput, Write    | Console UART / stdin + stdout  |
//! | `sim_engine` | SensingEngine       | Synthetic moving target         |
//! | `time`       | ClockPort           | ESP32 system timer / Instant   |

pub mod console_io;
pub mod sim_engine;
pub mod time;
