//! GPIO output for LEDs

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;
use thermocam_hal::OutputPin;

/// Push-pull output driving an LED
pub struct LedPin<'d> {
    output: Output<'d>,
}

impl<'d> LedPin<'d> {
    /// Claim a pin as an LED output, starting low
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            output: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for LedPin<'_> {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
