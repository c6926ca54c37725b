//! Minimal TOML parser for the camera configuration
//!
//! Handles only the subset used by `thermocam.toml`:
//! - `[section]` headers (`sensor`, `bus`, `acquisition`)
//! - `key = value` pairs with decimal or `0x` hex integers
//! - Comments (`# ...`), including trailing comments
//!
//! Keys that are absent keep their default value.

use super::types::{CameraConfig, FrameRate};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Unknown key, key outside a section, or a line without `=`
    InvalidKey,
    /// Value is not an integer
    InvalidValue,
    /// Integer does not fit the field or names no supported setting
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensor,
    Bus,
    Acquisition,
}

/// Parse TOML text into a `CameraConfig`
pub fn parse_config(input: &str) -> Result<CameraConfig, ParseError> {
    let mut config = CameraConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header
                .split('#')
                .next()
                .map(str::trim)
                .and_then(|h| h.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header.trim())?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidKey)?;

        match (section, key) {
            (Section::Sensor, "address") => {
                config.sensor_address = parse_int(value)?;
            }
            (Section::Sensor, "frame_rate_fps") => {
                let fps: u32 = parse_int(value)?;
                config.frame_rate = FrameRate::from_fps(fps).ok_or(ParseError::OutOfRange)?;
            }
            (Section::Bus, "frequency_hz") => {
                config.i2c_frequency = parse_int(value)?;
            }
            (Section::Bus, "timeout_ms") => {
                config.bus_timeout_ms = parse_int(value)?;
            }
            (Section::Acquisition, "tick_interval_ms") => {
                config.tick_interval_ms = parse_int(value)?;
            }
            _ => return Err(ParseError::InvalidKey),
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header {
        "sensor" => Ok(Section::Sensor),
        "bus" => Ok(Section::Bus),
        "acquisition" => Ok(Section::Acquisition),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a decimal or `0x`-prefixed hex integer
///
/// Underscores between digits (`400_000`) are accepted.
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return Err(ParseError::InvalidValue);
    }

    let mut wide: u64 = 0;
    for c in digits.chars().filter(|&c| c != '_') {
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        wide = wide
            .checked_mul(u64::from(radix))
            .and_then(|w| w.checked_add(u64::from(digit)))
            .ok_or(ParseError::OutOfRange)?;
    }

    T::try_from(wide).map_err(|_| ParseError::OutOfRange)
}
