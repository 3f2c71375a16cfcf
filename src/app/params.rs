//! Sensing-engine parameter keys and typed values.
//!
//! The engine speaks a string-keyed key/value protocol; these are the two
//! keys the console exposes and the typed forms the simulated engine and
//! the configuration use.

use core::fmt;
use core::ops::RangeInclusive;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum presence detection distance, decimal metres.
pub const RANGE_MAX: &str = "radar_presence_range_max";

/// Coarse detection threshold, one of `low`, `medium`, `high`.
pub const SENSITIVITY: &str = "radar_presence_sensitivity";

/// Range maximum accepted by the engine (metres), advertised to the operator.
pub const RANGE_MAX_LIMITS: RangeInclusive<f32> = 0.66..=10.2;

/// Longest parameter value the engine accepts or returns.
pub const VALUE_MAX_LEN: usize = 255;

/// A parameter value as returned by [`get_parameter`](super::ports::SensingEngine::get_parameter).
pub type ParamValue = heapless::String<VALUE_MAX_LEN>;

/// Presence sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl Sensitivity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a sensitivity token is not one of the three names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSensitivity;

impl FromStr for Sensitivity {
    type Err = UnknownSensitivity;

    /// Exact, case-sensitive match. The operator is told the lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(UnknownSensitivity),
        }
    }
}

/// Parse a range-maximum value the way the engine validates it.
///
/// Returns `None` for anything that is not a finite decimal inside
/// [`RANGE_MAX_LIMITS`].
pub fn parse_range_max(value: &str) -> Option<f32> {
    let metres: f32 = value.parse().ok()?;
    (metres.is_finite() && RANGE_MAX_LIMITS.contains(&metres)).then_some(metres)
}

/// Copy `s` into a [`ParamValue`], truncating at capacity.
pub fn param_value(s: &str) -> ParamValue {
    let mut v = ParamValue::new();
    for ch in s.chars() {
        if v.push(ch).is_err() {
            break;
        }
    }
    v
}
