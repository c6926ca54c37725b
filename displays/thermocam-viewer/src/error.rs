//! Viewer error types

use thermocam_protocol::PayloadError;
use thiserror::Error;

/// Errors surfaced to the viewer's caller
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Notification payload is not a whole frame
    #[error("malformed frame: expected {expected} bytes, got {actual}")]
    MalformedFrame { expected: usize, actual: usize },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The reconstruction worker thread could not be started
    #[error("failed to start reconstruction worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The reconstruction worker has shut down
    #[error("reconstruction worker stopped")]
    WorkerStopped,
}

impl From<PayloadError> for ViewerError {
    fn from(e: PayloadError) -> Self {
        match e {
            PayloadError::WrongLength { actual } => ViewerError::MalformedFrame {
                expected: thermocam_protocol::FRAME_LEN,
                actual,
            },
        }
    }
}

/// Errors loading a `ViewerConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type mismatch
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Field value is outside its allowed range
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Result alias for viewer operations
pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_maps_to_malformed_frame() {
        let err: ViewerError = PayloadError::WrongLength { actual: 20 }.into();
        assert!(matches!(
            err,
            ViewerError::MalformedFrame {
                expected: 128,
                actual: 20
            }
        ));
        assert_eq!(
            err.to_string(),
            "malformed frame: expected 128 bytes, got 20"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            field: "output_side",
            reason: "must be at least 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid value for `output_side`: must be at least 1"
        );
    }
}
