//! Color mapping

use crate::exposure::ExposureWindow;
use crate::grid::DisplayGrid;
use crate::palette::ColorGradient;

/// N×N packed pixels plus the exposure range they were mapped with
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    side: usize,
    pixels: Vec<u32>,
    window: Option<(f32, f32)>,
}

impl PixelBuffer {
    /// Side length
    pub fn side(&self) -> usize {
        self.side
    }

    /// Row-major `0xAARRGGBB` pixels
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at (row, col)
    pub fn get(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.side && col < self.side);
        self.pixels[row * self.side + col]
    }

    /// Exposure (min, max) used for this buffer
    pub fn window(&self) -> Option<(f32, f32)> {
        self.window
    }

    /// Take the pixel storage
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }
}

/// Widen `window` with the grid's own range, then map every cell
pub fn colorize(
    grid: &DisplayGrid,
    window: &mut ExposureWindow,
    gradient: &ColorGradient,
) -> PixelBuffer {
    if let Some((lo, hi)) = grid.min_max() {
        window.observe(lo, hi);
    }
    map_cells(grid, window, gradient)
}

/// Map every cell through an already-updated window
pub fn map_cells(grid: &DisplayGrid, window: &ExposureWindow, gradient: &ColorGradient) -> PixelBuffer {
    let pixels = grid
        .cells()
        .iter()
        .map(|&v| gradient.color(window.level(v)))
        .collect();

    PixelBuffer {
        side: grid.side(),
        pixels,
        window: window.bounds(),
    }
}
