//! Raw frame payload
//!
//! A frame is the 128-byte block read from the sensor's pixel registers:
//! 64 little-endian 16-bit words in row-major order.

/// Payload length in bytes
pub const FRAME_LEN: usize = 128;

/// Pixels per side of the sensor grid
pub const GRID_SIDE: usize = 8;

/// Pixels per frame
pub const PIXEL_COUNT: usize = GRID_SIDE * GRID_SIDE;

/// Bits carrying the pixel magnitude
pub const MAGNITUDE_MASK: u16 = 0x07FF;

/// Bit the viewer treats as the sign flag
///
/// Note this bit lies inside [`MAGNITUDE_MASK`]; a pixel with the flag set
/// has no positive reading.
pub const SIGN_FLAG: u16 = 0x0400;

/// Errors when building a frame from untrusted bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Buffer is not exactly [`FRAME_LEN`] bytes
    WrongLength {
        /// Number of bytes received
        actual: usize,
    },
}

/// One captured sensor frame
#[derive(Clone, PartialEq, Eq)]
pub struct RawFrame {
    bytes: [u8; FRAME_LEN],
}

impl Default for RawFrame {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl core::fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawFrame")
            .field("first_word", &self.word(0))
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RawFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RawFrame[{=[u8]:x}]", &self.bytes[..]);
    }
}

impl RawFrame {
    /// All-zero frame
    pub const fn zeroed() -> Self {
        Self {
            bytes: [0; FRAME_LEN],
        }
    }

    /// Wrap an owned buffer
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    /// Copy a received buffer, rejecting anything that is not exactly one frame
    pub fn from_slice(data: &[u8]) -> Result<Self, PayloadError> {
        let bytes: [u8; FRAME_LEN] = data
            .try_into()
            .map_err(|_| PayloadError::WrongLength { actual: data.len() })?;
        Ok(Self { bytes })
    }

    /// Build a frame from 64 pixel words
    pub fn from_words(words: &[u16; PIXEL_COUNT]) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        for (slot, word) in bytes.chunks_exact_mut(2).zip(words.iter()) {
            slot.copy_from_slice(&word.to_le_bytes());
        }
        Self { bytes }
    }

    /// Raw payload bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Mutable payload bytes, used by drivers reading straight into the frame
    pub fn as_mut_bytes(&mut self) -> &mut [u8; FRAME_LEN] {
        &mut self.bytes
    }

    /// Pixel word at `index` (row-major)
    ///
    /// # Panics
    /// If `index >= PIXEL_COUNT`.
    pub fn word(&self, index: usize) -> u16 {
        u16::from_le_bytes([self.bytes[index * 2], self.bytes[index * 2 + 1]])
    }

    /// Iterate over all pixel words in row-major order
    pub fn words(&self) -> impl Iterator<Item = u16> + '_ {
        self.bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
    }
}

/// Pack a magnitude and sign flag into a pixel word
///
/// Magnitude bits outside [`MAGNITUDE_MASK`] are dropped.
pub fn pack_pixel(magnitude: u16, sign: bool) -> u16 {
    let word = magnitude & MAGNITUDE_MASK;
    if sign {
        word | SIGN_FLAG
    } else {
        word
    }
}
