//! Configuration type definitions

/// Default 7-bit sensor bus address (Grid-EYE with AD_SELECT high)
pub const DEFAULT_SENSOR_ADDRESS: u8 = 0x69;

/// Default acquisition tick
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 1000;

/// Default per-transfer bus timeout
pub const DEFAULT_BUS_TIMEOUT_MS: u32 = 1000;

/// Default bus clock
pub const DEFAULT_I2C_FREQUENCY: u32 = 400_000;

/// Sensor internal frame rate
///
/// The value is the byte written to the sensor's frame-rate register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameRate {
    /// 10 frames per second
    #[default]
    Fps10 = 0x00,
    /// 1 frame per second
    Fps1 = 0x01,
}

impl FrameRate {
    /// Register value for this rate
    pub const fn register_value(self) -> u8 {
        self as u8
    }

    /// Look up a rate by frames per second
    pub fn from_fps(fps: u32) -> Option<Self> {
        match fps {
            10 => Some(FrameRate::Fps10),
            1 => Some(FrameRate::Fps1),
            _ => None,
        }
    }
}

/// Device-side camera configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CameraConfig {
    /// 7-bit sensor address
    pub sensor_address: u8,
    /// Sensor internal frame rate
    pub frame_rate: FrameRate,
    /// Bus clock in Hz
    pub i2c_frequency: u32,
    /// Upper bound for a single bus transfer
    pub bus_timeout_ms: u32,
    /// Acquisition period
    pub tick_interval_ms: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensor_address: DEFAULT_SENSOR_ADDRESS,
            frame_rate: FrameRate::Fps10,
            i2c_frequency: DEFAULT_I2C_FREQUENCY,
            bus_timeout_ms: DEFAULT_BUS_TIMEOUT_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Reasons a configuration is unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigIssue {
    /// Address outside the 7-bit non-reserved range
    SensorAddress,
    /// Tick interval is zero
    TickInterval,
    /// Bus timeout is zero or not shorter than the tick
    BusTimeout,
    /// Bus clock outside standard/fast mode
    Frequency,
}

impl CameraConfig {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if !(0x08..=0x77).contains(&self.sensor_address) {
            return Err(ConfigIssue::SensorAddress);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigIssue::TickInterval);
        }
        // A stalled transfer must give up before the next tick is due
        if self.bus_timeout_ms == 0 || self.bus_timeout_ms > self.tick_interval_ms {
            return Err(ConfigIssue::BusTimeout);
        }
        if !(10_000..=400_000).contains(&self.i2c_frequency) {
            return Err(ConfigIssue::Frequency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CameraConfig::default();
        assert_eq!(config.sensor_address, 0x69);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_frame_rate_register() {
        assert_eq!(FrameRate::Fps10.register_value(), 0x00);
        assert_eq!(FrameRate::Fps1.register_value(), 0x01);
        assert_eq!(FrameRate::from_fps(1), Some(FrameRate::Fps1));
        assert_eq!(FrameRate::from_fps(5), None);
    }

    #[test]
    fn test_validate_rejects() {
        let bad_addr = CameraConfig {
            sensor_address: 0x80,
            ..Default::default()
        };
        assert_eq!(bad_addr.validate(), Err(ConfigIssue::SensorAddress));

        let zero_tick = CameraConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero_tick.validate(), Err(ConfigIssue::TickInterval));

        let long_timeout = CameraConfig {
            bus_timeout_ms: 1500,
            ..Default::default()
        };
        assert_eq!(long_timeout.validate(), Err(ConfigIssue::BusTimeout));

        let fast = CameraConfig {
            i2c_frequency: 1_000_000,
            ..Default::default()
        };
        assert_eq!(fast.validate(), Err(ConfigIssue::Frequency));
    }
}
