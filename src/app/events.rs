//! Events raised by the sensing engine and the status text they produce.
//!
//! The engine calls back synchronously from inside
//! [`process`](super::ports::SensingEngine::process); nothing here is
//! queued. [`StatusLine`] renders the operator-facing line for a presence
//! transition.

use core::fmt;

/// Everything the engine can report through its callback.
///
/// Only the presence class is requested at setup; the counter class exists
/// because the engine supports it, and the presence handler ignores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensingEvent {
    /// An object entered the detection range.
    PresenceIn {
        timestamp_ms: u64,
        distance_m: f32,
        accuracy_m: f32,
    },
    /// The detection range became empty.
    PresenceOut { timestamp_ms: u64 },
    /// Entrance counter: someone crossed inwards.
    CounterIn { timestamp_ms: u64, count: u32 },
    /// Entrance counter: someone crossed outwards.
    CounterOut { timestamp_ms: u64, count: u32 },
}

impl SensingEvent {
    /// The presence transition carried by this event, if any.
    pub fn presence(&self) -> Option<PresenceEvent> {
        match *self {
            Self::PresenceIn {
                timestamp_ms,
                distance_m,
                accuracy_m,
            } => Some(PresenceEvent::In {
                timestamp_ms,
                distance_m,
                accuracy_m,
            }),
            Self::PresenceOut { timestamp_ms } => Some(PresenceEvent::Out { timestamp_ms }),
            Self::CounterIn { .. } | Self::CounterOut { .. } => None,
        }
    }
}

/// A presence transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresenceEvent {
    In {
        timestamp_ms: u64,
        distance_m: f32,
        accuracy_m: f32,
    },
    Out {
        timestamp_ms: u64,
    },
}

impl PresenceEvent {
    pub fn timestamp_ms(&self) -> u64 {
        match *self {
            Self::In { timestamp_ms, .. } | Self::Out { timestamp_ms } => timestamp_ms,
        }
    }

    /// Indicator state this transition drives.
    pub fn indicator_state(&self) -> IndicatorState {
        match self {
            Self::In { .. } => IndicatorState::Present,
            Self::Out { .. } => IndicatorState::Absent,
        }
    }

    /// Formatter for the status line (no trailing newline).
    pub fn status_line(&self) -> StatusLine {
        StatusLine(*self)
    }
}

/// Whether the detection range is occupied.
///
/// RED is lit for [`Present`](Self::Present), GREEN for
/// [`Absent`](Self::Absent). Before the first event neither is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Present,
    Absent,
}

/// `<time_s:.3>: Presence IN <near:.2>-<far:.2>` or `<time_s:.3>: Presence OUT`.
///
/// `near`/`far` are `distance ∓ accuracy`.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine(PresenceEvent);

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time_s = self.0.timestamp_ms() as f64 / 1000.0;
        match self.0 {
            PresenceEvent::In {
                distance_m,
                accuracy_m,
                ..
            } => write!(
                f,
                "{:.3}: Presence IN {:.2}-{:.2}",
                time_s,
                distance_m - accuracy_m,
                distance_m + accuracy_m
            ),
            PresenceEvent::Out { .. } => write!(f, "{:.3}: Presence OUT", time_s),
        }
    }
}
