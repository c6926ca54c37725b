//! I2C bus abstractions
//!
//! Provides traits for I2C master operations that can be implemented
//! by chip-specific HALs.

use core::future::Future;

use embedded_hal_async::i2c::ErrorKind;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (device absent or busy)
    Nack,
    /// Transfer did not complete within the configured timeout
    Timeout,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl I2cError {
    /// Whether retrying the same transfer later may succeed
    ///
    /// Every I2C failure is treated as transient by the acquisition loop;
    /// this only separates "device did not answer" from electrical trouble
    /// for diagnostics.
    pub fn is_no_response(&self) -> bool {
        matches!(self, I2cError::Nack | I2cError::Timeout)
    }
}

impl From<ErrorKind> for I2cError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cError::Bus,
            ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cError::Nack,
            ErrorKind::Overrun => I2cError::Overrun,
            _ => I2cError::Other,
        }
    }
}

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Operations are async so a chip HAL can bound them
/// with a timer instead of blocking the executor.
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8])
        -> impl Future<Output = Result<(), I2cError>>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> impl Future<Output = Result<(), I2cError>>;
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Upper bound for a single transfer in milliseconds
    pub timeout_ms: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self {
            frequency: 400_000, // Grid-EYE supports fast mode
            timeout_ms: 1000,
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self {
        frequency: 100_000,
        timeout_ms: 1000,
    };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self {
        frequency: 400_000,
        timeout_ms: 1000,
    };

    /// Same clock, different timeout
    pub const fn with_timeout_ms(self, timeout_ms: u32) -> Self {
        Self {
            frequency: self.frequency,
            timeout_ms,
        }
    }
}
