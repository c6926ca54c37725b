//! RP2040-specific HAL for the Thermocam firmware
//!
//! This crate provides RP2040 implementations of the shared `thermocam-hal`
//! traits:
//!
//! - Timeout-bounded I2C master (wraps any `embedded-hal-async` bus)
//! - GPIO output pin for status and fault LEDs

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod i2c;

pub use gpio::LedPin;
pub use i2c::TimedI2c;

// Re-export shared traits from thermocam-hal for convenience
pub use thermocam_hal::{I2cBus, I2cConfig, I2cError, OutputPin};
