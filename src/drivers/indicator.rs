//! Presence indicator driver.
//!
//! Two discrete LEDs: RED while an object is present, GREEN while the range
//! is empty. Both are off from construction until the first event.
//!
//! Generic over `embedded-hal` output pins so it runs unchanged on the
//! board ([`GpioOutput`](super::gpio::GpioOutput)) and in tests.

use embedded_hal::digital::OutputPin;

use crate::app::events::IndicatorState;
use crate::app::ports::IndicatorPort;

pub struct PresenceIndicator<R, G> {
    red: R,
    green: G,
    current: Option<IndicatorState>,
}

impl<R: OutputPin, G: OutputPin> PresenceIndicator<R, G> {
    /// Take both pins and drive them to the off baseline.
    pub fn new(red: R, green: G) -> Self {
        let mut led = Self {
            red,
            green,
            current: None,
        };
        led.all_off();
        led
    }

    pub fn release(self) -> (R, G) {
        (self.red, self.green)
    }
}

impl<R: OutputPin, G: OutputPin> IndicatorPort for PresenceIndicator<R, G> {
    fn show(&mut self, state: IndicatorState) {
        // Extinguish first so the two are never lit together.
        let (off, on) = match state {
            IndicatorState::Present => (self.green.set_low().is_ok(), self.red.set_high().is_ok()),
            IndicatorState::Absent => (self.red.set_low().is_ok(), self.green.set_high().is_ok()),
        };
        if !(off && on) {
            log::warn!("indicator: pin write failed for {:?}", state);
        }
        self.current = Some(state);
    }

    fn all_off(&mut self) {
        if self.red.set_low().is_err() || self.green.set_low().is_err() {
            log::warn!("indicator: pin write failed while clearing");
        }
        self.current = None;
    }

    fn state(&self) -> Option<IndicatorState> {
        self.current
    }
}
