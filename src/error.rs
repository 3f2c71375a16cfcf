//! Unified error type for the radar presence firmware.
//!
//! Both failure sources that can stop the system funnel into [`Error`]:
//! one-shot peripheral bring-up and the sensing engine. All variants are
//! `Copy` so the sensing task can return them from its loop without
//! allocation.

use core::fmt;

use crate::app::ports::EngineError;
use crate::drivers::hw_init::HwInitError;

/// Every fatal condition in the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The sensing engine failed during setup or processing.
    Engine(EngineError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Engine(e) => write!(f, "engine: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Init(e) => Some(e),
            Self::Engine(e) => Some(e),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<EngineError> for Error {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
