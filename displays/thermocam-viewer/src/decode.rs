//! Frame decoder
//!
//! Each pixel is a little-endian word: low 11 bits magnitude in quarter
//! degrees, bit 10 a sign flag. The flag lies inside the magnitude field, so
//! any reading of 256 °C or more is indistinguishable from a flagged one.

use serde::{Deserialize, Serialize};
use thermocam_protocol::{RawFrame, MAGNITUDE_MASK, PIXEL_COUNT, SIGN_FLAG};

use crate::error::Result;
use crate::grid::TemperatureGrid;

/// How pixels with the sign flag set are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignPolicy {
    /// Flagged pixels read as exactly 0.0 °C
    #[default]
    Zeroed,
    /// Flagged pixels read as the negative two's-complement value of the
    /// 11-bit field
    TwosComplement,
}

/// Decode one pixel word
pub fn decode_word(word: u16, policy: SignPolicy) -> f32 {
    let magnitude = word & MAGNITUDE_MASK;
    if word & SIGN_FLAG == 0 {
        return f32::from(magnitude) / 4.0;
    }

    match policy {
        SignPolicy::Zeroed => 0.0,
        SignPolicy::TwosComplement => {
            let negated = (!word & MAGNITUDE_MASK) + 1;
            -f32::from(negated) / 4.0
        }
    }
}

/// Decode a frame with the default sign policy
pub fn decode(frame: &RawFrame) -> TemperatureGrid {
    decode_with(frame, SignPolicy::default())
}

/// Decode a frame
pub fn decode_with(frame: &RawFrame, policy: SignPolicy) -> TemperatureGrid {
    let mut cells = [0.0f32; PIXEL_COUNT];
    for (cell, word) in cells.iter_mut().zip(frame.words()) {
        *cell = decode_word(word, policy);
    }
    TemperatureGrid::new(cells)
}

/// Decode a received notification payload
///
/// Anything other than exactly one frame is rejected before decoding.
pub fn decode_bytes(payload: &[u8], policy: SignPolicy) -> Result<TemperatureGrid> {
    let frame = RawFrame::from_slice(payload)?;
    Ok(decode_with(&frame, policy))
}
