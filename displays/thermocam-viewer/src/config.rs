//! Viewer configuration
//!
//! Loaded from TOML; every field is optional and `ViewerConfig::default()`
//! reproduces the stock viewer.
//!
//! ```toml
//! output_side = 128
//! sign_policy = "zeroed"          # or "twos_complement"
//! exposure_source = "decoded"     # or "resampled"
//! exposure_epsilon = 0.25
//! weight_cache_capacity = 65536
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::SignPolicy;
use crate::error::ConfigError;
use crate::exposure::DEFAULT_EPSILON;
use crate::resample::DEFAULT_CACHE_CAPACITY;

/// Largest supported output side
pub const MAX_OUTPUT_SIDE: usize = 1024;

/// Which grid feeds the exposure window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureSource {
    /// The decoded 8×8 temperatures
    #[default]
    Decoded,
    /// The resampled N×N grid, including filter overshoot
    Resampled,
}

/// Receiver-side settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Output image side in pixels
    pub output_side: usize,
    /// Interpretation of flagged pixels
    pub sign_policy: SignPolicy,
    /// Grid used to widen the exposure window
    pub exposure_source: ExposureSource,
    /// Widening applied to a zero-width exposure window
    pub exposure_epsilon: f32,
    /// Maximum number of cached kernel weight products
    pub weight_cache_capacity: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            output_side: 128,
            sign_policy: SignPolicy::default(),
            exposure_source: ExposureSource::default(),
            exposure_epsilon: DEFAULT_EPSILON,
            weight_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded viewer config");
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_side == 0 || self.output_side > MAX_OUTPUT_SIDE {
            return Err(ConfigError::Invalid {
                field: "output_side",
                reason: "must be between 1 and 1024",
            });
        }
        if !(self.exposure_epsilon.is_finite() && self.exposure_epsilon > 0.0) {
            return Err(ConfigError::Invalid {
                field: "exposure_epsilon",
                reason: "must be a positive number",
            });
        }
        if self.weight_cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "weight_cache_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
