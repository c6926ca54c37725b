//! Iron-style color gradient
//!
//! 256 packed `0xAARRGGBB` pixels built once from four linear segments:
//! deep blue → green → yellow → orange → red.

/// Gradient stops as (level, r, g, b)
const STOPS: [(usize, u8, u8, u8); 5] = [
    (0, 0, 0, 139),
    (64, 0, 200, 0),
    (128, 255, 255, 0),
    (192, 255, 140, 0),
    (255, 255, 0, 0),
];

/// Pack an opaque pixel
pub const fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Immutable 256-entry lookup table
#[derive(Clone, PartialEq, Eq)]
pub struct ColorGradient {
    table: [u32; 256],
}

impl core::fmt::Debug for ColorGradient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorGradient")
            .field("first", &format_args!("{:#010x}", self.table[0]))
            .field("last", &format_args!("{:#010x}", self.table[255]))
            .finish()
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::iron()
    }
}

impl ColorGradient {
    /// The blue-to-red ramp used by the viewer
    pub fn iron() -> Self {
        let mut table = [0u32; 256];
        for pair in STOPS.windows(2) {
            let (start, r0, g0, b0) = pair[0];
            let (end, r1, g1, b1) = pair[1];
            let span = (end - start) as f32;
            for (offset, slot) in table[start..=end].iter_mut().enumerate() {
                let t = offset as f32 / span;
                *slot = pack_argb(lerp(r0, r1, t), lerp(g0, g1, t), lerp(b0, b1, t));
            }
        }
        Self { table }
    }

    /// Pixel for a 0..=255 level
    pub fn color(&self, level: u8) -> u32 {
        self.table[usize::from(level)]
    }

    /// The whole table
    pub fn table(&self) -> &[u32; 256] {
        &self.table
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(pixel: u32) -> (u8, u8, u8) {
        ((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
    }

    #[test]
    fn test_stops_are_exact() {
        let gradient = ColorGradient::iron();
        assert_eq!(rgb(gradient.color(0)), (0, 0, 139));
        assert_eq!(rgb(gradient.color(64)), (0, 200, 0));
        assert_eq!(rgb(gradient.color(128)), (255, 255, 0));
        assert_eq!(rgb(gradient.color(192)), (255, 140, 0));
        assert_eq!(rgb(gradient.color(255)), (255, 0, 0));
    }

    #[test]
    fn test_all_opaque() {
        let gradient = ColorGradient::default();
        assert!(gradient.table().iter().all(|p| p >> 24 == 0xFF));
    }

    #[test]
    fn test_segments_are_linear() {
        let gradient = ColorGradient::iron();
        // Halfway along blue → green
        assert_eq!(rgb(gradient.color(32)), (0, 100, 70));
        // Red channel rises monotonically up to yellow
        let reds: Vec<u8> = (64..=128).map(|l| rgb(gradient.color(l)).0).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_pack_argb() {
        assert_eq!(pack_argb(0x12, 0x34, 0x56), 0xFF12_3456);
    }
}
