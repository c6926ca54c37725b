//! Timeout-bounded I2C master
//!
//! The async I2C driver waits on an interrupt; a sensor that holds SCL low
//! would park the camera task forever. Every transfer here races a timer and
//! reports `I2cError::Timeout` when the timer wins.

use embassy_time::{with_timeout, Duration};
use embedded_hal_async::i2c::{Error as _, I2c};
use thermocam_hal::{I2cBus, I2cConfig, I2cError};

/// I2C bus wrapper that bounds each transfer
pub struct TimedI2c<B> {
    bus: B,
    timeout: Duration,
}

impl<B: I2c> TimedI2c<B> {
    /// Wrap a configured bus
    pub fn new(bus: B, config: &I2cConfig) -> Self {
        Self {
            bus,
            timeout: Duration::from_millis(u64::from(config.timeout_ms)),
        }
    }

    /// Per-transfer timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<B: I2c> I2cBus for TimedI2c<B> {
    async fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        match with_timeout(self.timeout, self.bus.write(address, data)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(I2cError::from(e.kind())),
            Err(_) => Err(I2cError::Timeout),
        }
    }

    async fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        match with_timeout(self.timeout, self.bus.read(address, buf)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(I2cError::from(e.kind())),
            Err(_) => Err(I2cError::Timeout),
        }
    }
}

