//! GPIO fault LED
//!
//! Lit while the most recent cycle failed, dark once a cycle succeeds.

use thermocam_core::traits::FaultIndicator;
use thermocam_core::CycleFault;
use thermocam_hal::OutputPin;

/// Fault LED on a GPIO pin
pub struct FaultLed<P> {
    pin: P,
    /// If true, LED on = pin LOW
    inverted: bool,
    /// Faults seen since boot
    faults: u32,
}

impl<P: OutputPin> FaultLed<P> {
    /// Create a fault LED, starting dark
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin driving the LED
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            faults: 0,
        };
        led.set_lit(false);
        led
    }

    /// Create a fault LED on an active-high pin
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Check if the LED is currently lit
    pub fn is_lit(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }

    /// Faults reported since boot
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    fn set_lit(&mut self, lit: bool) {
        self.pin.set_state(lit != self.inverted);
    }
}

impl<P: OutputPin> FaultIndicator for FaultLed<P> {
    fn fault(&mut self, _fault: CycleFault) {
        self.faults = self.faults.wrapping_add(1);
        self.set_lit(true);
    }

    fn clear(&mut self) {
        self.set_lit(false);
    }
}
