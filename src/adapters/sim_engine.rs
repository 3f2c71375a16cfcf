//! Simulated sensing engine.
//!
//! Host stand-in for the radar presence library. It honours the engine
//! contract (lifecycle, parameter validation, monotonic timestamps,
//! synchronous callbacks) and feeds it a synthetic target that walks back
//! and forth in front of the sensor.
//!
//! ```text
//!   distance ▲        /\        /\
//!       far  │       /  \      /  \
//!            │      /    \    /    \
//! range_max ─┼ ─ ─ / ─ ─ ─\─ / ─ ─ ─\─ ─   inside ⇒ IN after confirm_ms
//!      near  │ \  /        \/        \/    outside ⇒ OUT after hold_ms
//!            └──────────────────────────▶ t
//! ```

use log::debug;

use crate::app::events::SensingEvent;
use crate::app::params::{self, param_value, ParamValue, Sensitivity, VALUE_MAX_LEN};
use crate::app::ports::{EngineError, EventCallback, EventMask, SensingEngine};
use crate::drivers::hw_init::RadarTransport;

/// Path of the synthetic target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub near_m: f32,
    pub far_m: f32,
    /// Time for one near → far → near sweep.
    pub period_ms: u64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            near_m: 0.3,
            far_m: 4.0,
            period_ms: 20_000,
        }
    }
}

impl Motion {
    /// Target distance at `t_ms` (triangle wave, starts at `near_m`).
    pub fn distance_at(&self, t_ms: u64) -> f32 {
        let period = self.period_ms.max(2);
        let half = period / 2;
        let phase = t_ms % period;
        let rising = if phase < half { phase } else { period - phase };
        self.near_m + (self.far_m - self.near_m) * (rising as f32 / half as f32)
    }
}

/// Detection timing and accuracy for one sensitivity level.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tuning {
    /// Target must stay inside this long before `PresenceIn`.
    confirm_ms: u64,
    /// Target must stay outside this long before `PresenceOut`.
    hold_ms: u64,
    accuracy_m: f32,
}

const fn tuning(sensitivity: Sensitivity) -> Tuning {
    match sensitivity {
        Sensitivity::High => Tuning { confirm_ms: 200, hold_ms: 2_000, accuracy_m: 0.03 },
        Sensitivity::Medium => Tuning { confirm_ms: 500, hold_ms: 1_000, accuracy_m: 0.05 },
        Sensitivity::Low => Tuning { confirm_ms: 1_000, hold_ms: 500, accuracy_m: 0.10 },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Configured,
    Enabled,
}

pub struct SimulatedEngine {
    lifecycle: Lifecycle,
    mask: EventMask,
    callback: Option<EventCallback>,
    motion: Motion,

    range_max_m: f32,
    range_max_value: ParamValue,
    sensitivity: Sensitivity,

    last_ms: Option<u64>,
    present: bool,
    inside_since: Option<u64>,
    outside_since: Option<u64>,
    entrances: u32,
}

impl SimulatedEngine {
    /// Bind to `transport`, producing only the event classes in `mask`.
    pub fn new(transport: RadarTransport, mask: EventMask) -> Result<Self, EngineError> {
        Self::with_motion(transport, mask, Motion::default())
    }

    pub fn with_motion(
        transport: RadarTransport,
        mask: EventMask,
        motion: Motion,
    ) -> Result<Self, EngineError> {
        if transport.config.spi_frequency_hz == 0 {
            return Err(EngineError::Hardware);
        }
        if mask.bits() == 0 {
            return Err(EngineError::InvalidValue);
        }
        debug!(
            "sim engine: bound at {} Hz, mask={:#04b}, target {:.2}-{:.2} m",
            transport.config.spi_frequency_hz,
            mask.bits(),
            motion.near_m,
            motion.far_m
        );
        Ok(Self {
            lifecycle: Lifecycle::Configured,
            mask,
            callback: None,
            motion,
            range_max_m: 2.0,
            range_max_value: param_value("2.0"),
            sensitivity: Sensitivity::Medium,
            last_ms: None,
            present: false,
            inside_since: None,
            outside_since: None,
            entrances: 0,
        })
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    fn emit(&mut self, event: SensingEvent) {
        if let Some(callback) = self.callback.as_mut() {
            callback(&event);
        }
    }

    fn enter(&mut self, now_ms: u64, distance_m: f32) {
        self.present = true;
        if self.mask.contains(EventMask::PRESENCE) {
            let accuracy_m = tuning(self.sensitivity).accuracy_m;
            self.emit(SensingEvent::PresenceIn {
                timestamp_ms: now_ms,
                distance_m,
                accuracy_m,
            });
        }
        if self.mask.contains(EventMask::ENTRANCE_COUNTER) {
            self.entrances += 1;
            let count = self.entrances;
            self.emit(SensingEvent::CounterIn {
                timestamp_ms: now_ms,
                count,
            });
        }
    }

    fn leave(&mut self, now_ms: u64) {
        self.present = false;
        if self.mask.contains(EventMask::PRESENCE) {
            self.emit(SensingEvent::PresenceOut { timestamp_ms: now_ms });
        }
        if self.mask.contains(EventMask::ENTRANCE_COUNTER) {
            let count = self.entrances;
            self.emit(SensingEvent::CounterOut {
                timestamp_ms: now_ms,
                count,
            });
        }
    }
}

impl SensingEngine for SimulatedEngine {
    fn register_callback(&mut self, callback: EventCallback) -> Result<(), EngineError> {
        self.callback = Some(callback);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), EngineError> {
        self.lifecycle = Lifecycle::Enabled;
        Ok(())
    }

    fn process(&mut self, timestamp_ms: u64) -> Result<(), EngineError> {
        if self.lifecycle != Lifecycle::Enabled {
            return Err(EngineError::NotEnabled);
        }
        if self.last_ms.is_some_and(|last| timestamp_ms < last) {
            return Err(EngineError::ClockWentBackwards);
        }
        self.last_ms = Some(timestamp_ms);

        let distance_m = self.motion.distance_at(timestamp_ms);
        let Tuning { confirm_ms, hold_ms, .. } = tuning(self.sensitivity);

        if distance_m <= self.range_max_m {
            self.outside_since = None;
            let since = *self.inside_since.get_or_insert(timestamp_ms);
            if !self.present && timestamp_ms - since >= confirm_ms {
                self.enter(timestamp_ms, distance_m);
            }
        } else {
            self.inside_since = None;
            let since = *self.outside_since.get_or_insert(timestamp_ms);
            if self.present && timestamp_ms - since >= hold_ms {
                self.leave(timestamp_ms);
            }
        }
        Ok(())
    }

    fn set_parameter(&mut self, key: &str, value: &[u8]) -> Result<(), EngineError> {
        if value.len() > VALUE_MAX_LEN {
            return Err(EngineError::ValueTooLong);
        }
        let value = core::str::from_utf8(value).map_err(|_| EngineError::InvalidValue)?;
        match key {
            params::RANGE_MAX => {
                self.range_max_m = params::parse_range_max(value).ok_or(EngineError::InvalidValue)?;
                self.range_max_value = param_value(value);
            }
            params::SENSITIVITY => {
                self.sensitivity = value.parse().map_err(|_| EngineError::InvalidValue)?;
            }
            _ => return Err(EngineError::UnknownParameter),
        }
        debug!("sim engine: {} = {}", key, value);
        Ok(())
    }

    fn get_parameter(&self, key: &str) -> Result<ParamValue, EngineError> {
        match key {
            params::RANGE_MAX => Ok(self.range_max_value.clone()),
            params::SENSITIVITY => Ok(param_value(self.sensitivity.as_str())),
            _ => Err(EngineError::UnknownParameter),
        }
    }
}
