//! Push-pull output pin behind the `embedded-hal` [`OutputPin`] trait.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the GPIO level register via [`hw_init::gpio_write`]
//! (the pin must already be configured as an output by `hw_init`).
//! On host/test: tracks the level in memory and logs transitions.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::hw_init;

pub struct GpioOutput {
    gpio: i32,
    high: bool,
}

impl GpioOutput {
    /// Wrap an already-configured output. The level is assumed LOW.
    pub fn new(gpio: i32) -> Self {
        Self { gpio, high: false }
    }

    pub fn is_set_high(&self) -> bool {
        self.high
    }

    fn write(&mut self, high: bool) {
        hw_init::gpio_write(self.gpio, high);
        #[cfg(not(target_os = "espidf"))]
        if self.high != high {
            log::debug!("gpio(sim): {} -> {}", self.gpio, if high { "HIGH" } else { "LOW" });
        }
        self.high = high;
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}
