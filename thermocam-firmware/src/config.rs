//! Embedded configuration loading

use defmt::*;
use thermocam_core::config::{parse_config, CameraConfig};

/// Parse and validate the embedded configuration
///
/// build.rs already rejects bad files, so a failure here means the parser
/// and the build check disagree. Fall back to defaults rather than halt.
pub fn load_config(text: &str) -> CameraConfig {
    let config = match parse_config(text) {
        Ok(config) => config,
        Err(e) => {
            warn!("Config parse error: {:?}, using defaults", e);
            return CameraConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => config,
        Err(issue) => {
            warn!("Config rejected: {:?}, using defaults", issue);
            CameraConfig::default()
        }
    }
}
