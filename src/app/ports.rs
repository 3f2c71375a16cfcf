//! Port traits: the boundary between the two tasks and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SensingTask / ConsoleTask
//! ```
//!
//! The sensing engine, the presence LEDs and the operator's input channel
//! are all reached through these traits. The tasks consume them via
//! generics, so both can be driven by mocks on the host.

use core::fmt;

use super::events::{IndicatorState, SensingEvent};
use super::params::ParamValue;

// ───────────────────────────────────────────────────────────────
// Sensing engine port (external detection library)
// ───────────────────────────────────────────────────────────────

/// Handler the engine invokes from inside [`SensingEngine::process`].
///
/// Registered once at setup; runs on the sensing task's own thread.
pub type EventCallback = Box<dyn FnMut(&SensingEvent) + Send>;

/// Narrow interface to the radar sensing engine.
///
/// Construction binds the engine to its transport (see
/// [`SensingTask::setup`](crate::sensing::task::SensingTask::setup)).
/// `enable` must succeed before `process` does anything useful.
/// Validation of parameter values belongs to the engine.
pub trait SensingEngine: Send {
    /// Install the event handler. Replaces any previous handler.
    fn register_callback(&mut self, callback: EventCallback) -> Result<(), EngineError>;

    /// Start acquisition.
    fn enable(&mut self) -> Result<(), EngineError>;

    /// Run one processing step at `timestamp_ms` (monotonic, non-decreasing).
    ///
    /// May call the registered handler zero or more times before returning.
    fn process(&mut self, timestamp_ms: u64) -> Result<(), EngineError>;

    /// Set a string-keyed parameter.
    ///
    /// `value` is the operator's bytes as typed; decoding and validation
    /// belong to the engine.
    fn set_parameter(&mut self, key: &str, value: &[u8]) -> Result<(), EngineError>;

    /// Read a string-keyed parameter.
    fn get_parameter(&self, key: &str) -> Result<ParamValue, EngineError>;
}

/// Event classes an engine can be asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventMask(u8);

impl EventMask {
    pub const PRESENCE: Self = Self(0b0000_0001);
    pub const ENTRANCE_COUNTER: Self = Self(0b0000_0010);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock that stamps each `process` call.
pub trait ClockPort {
    /// Milliseconds since boot. Never decreases.
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → LEDs)
// ───────────────────────────────────────────────────────────────

/// Two mutually-exclusive presence LEDs.
pub trait IndicatorPort {
    /// Light exactly the LED for `state` and extinguish the other.
    fn show(&mut self, state: IndicatorState);

    /// Extinguish both LEDs (startup baseline).
    fn all_off(&mut self);

    /// Last state shown, `None` while at the baseline.
    fn state(&self) -> Option<IndicatorState>;
}

// ───────────────────────────────────────────────────────────────
// Operator input port (byte-level receive side of the console channel)
// ───────────────────────────────────────────────────────────────

/// Result of a non-blocking receive attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxPoll {
    /// One byte was pending.
    Byte(u8),
    /// Nothing pending right now.
    Empty,
    /// The channel reported end-of-input; no more bytes will arrive.
    Closed,
}

/// Receive side of the operator channel. Output goes through the
/// [`ConsoleMutex`](crate::console::mutex::ConsoleMutex) instead.
pub trait CharInput {
    /// Non-blocking receive.
    fn poll_byte(&mut self) -> RxPoll;

    /// Blocking receive. `None` on end-of-input.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Raw byte transmit on the operator channel, for echoing input verbatim.
///
/// Formatted text still goes through `fmt::Write`; this carries bytes that
/// need not be UTF-8.
pub trait CharOutput {
    fn write_byte(&mut self, byte: u8) -> fmt::Result;
}

impl CharOutput for Vec<u8> {
    fn write_byte(&mut self, byte: u8) -> fmt::Result {
        self.push(byte);
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SensingEngine`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Construction failed or the engine was never constructed.
    NotInitialized,
    /// `process` called before `enable`.
    NotEnabled,
    /// Parameter key not recognised.
    UnknownParameter,
    /// Parameter value rejected by validation.
    InvalidValue,
    /// Parameter value longer than the engine accepts.
    ValueTooLong,
    /// The radar front-end or its transport failed.
    Hardware,
    /// `process` timestamp went backwards.
    ClockWentBackwards,
    /// Another holder of the engine lock panicked.
    Poisoned,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "engine not initialized"),
            Self::NotEnabled => write!(f, "engine not enabled"),
            Self::UnknownParameter => write!(f, "unknown parameter"),
            Self::InvalidValue => write!(f, "invalid parameter value"),
            Self::ValueTooLong => write!(f, "parameter value too long"),
            Self::Hardware => write!(f, "radar hardware fault"),
            Self::ClockWentBackwards => write!(f, "timestamp went backwards"),
            Self::Poisoned => write!(f, "engine lock poisoned"),
        }
    }
}

impl std::error::Error for EngineError {}
