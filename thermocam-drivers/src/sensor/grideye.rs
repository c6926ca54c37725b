//! Panasonic Grid-EYE (AMG88xx) 8×8 thermopile array
//!
//! Register usage:
//! - `0x02` frame-rate register, written once at setup
//! - `0x80` first pixel register; addressing it starts a capture and the
//!   following 128-byte read returns the 64 little-endian pixel words

use thermocam_core::config::{FrameRate, DEFAULT_SENSOR_ADDRESS};
use thermocam_core::traits::{SensorError, ThermalSensor};
use thermocam_hal::{I2cBus, I2cError};
use thermocam_protocol::RawFrame;

/// Frame-rate register
const REG_FRAME_RATE: u8 = 0x02;

/// First pixel register (T01L)
const REG_PIXEL_BASE: u8 = 0x80;

fn sensor_error(e: I2cError) -> SensorError {
    match e {
        I2cError::Nack => SensorError::NoResponse,
        I2cError::Timeout => SensorError::Timeout,
        I2cError::Bus | I2cError::ArbitrationLost | I2cError::Overrun | I2cError::Other => {
            SensorError::Bus
        }
    }
}

/// Grid-EYE on an I2C bus
pub struct GridEye<I2C> {
    bus: I2C,
    address: u8,
    frame_rate: FrameRate,
}

impl<I2C: I2cBus> GridEye<I2C> {
    /// Create a driver at the default address with 10 fps internal rate
    pub fn new(bus: I2C) -> Self {
        Self::with_address(bus, DEFAULT_SENSOR_ADDRESS)
    }

    /// Create a driver at a specific 7-bit address
    pub fn with_address(bus: I2C, address: u8) -> Self {
        Self {
            bus,
            address,
            frame_rate: FrameRate::default(),
        }
    }

    /// Use a different internal frame rate on the next `initialize`
    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Bus address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.bus
    }
}

impl<I2C: I2cBus> ThermalSensor for GridEye<I2C> {
    async fn initialize(&mut self) -> Result<(), SensorError> {
        let cmd = [REG_FRAME_RATE, self.frame_rate.register_value()];
        self.bus.write(self.address, &cmd).await.map_err(sensor_error)
    }

    async fn trigger_capture(&mut self) -> Result<(), SensorError> {
        self.bus
            .write(self.address, &[REG_PIXEL_BASE])
            .await
            .map_err(sensor_error)
    }

    async fn read_frame(&mut self, frame: &mut RawFrame) -> Result<(), SensorError> {
        self.bus
            .read(self.address, frame.as_mut_bytes())
            .await
            .map_err(sensor_error)
    }
}
