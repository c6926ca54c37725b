//! Temperature grids
//!
//! Both grids are row-major and immutable once produced.

use thermocam_protocol::{GRID_SIDE, PIXEL_COUNT};

/// Decoded 8×8 sensor frame in °C
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureGrid {
    cells: [f32; PIXEL_COUNT],
}

impl TemperatureGrid {
    /// Side length of the sensor grid
    pub const SIDE: usize = GRID_SIDE;

    /// Wrap 64 row-major cells
    pub fn new(cells: [f32; PIXEL_COUNT]) -> Self {
        Self { cells }
    }

    /// Every cell set to `value`
    pub fn filled(value: f32) -> Self {
        Self::new([value; PIXEL_COUNT])
    }

    /// Build from a function of (row, col)
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f32) -> Self {
        Self::new(core::array::from_fn(|i| f(i / GRID_SIDE, i % GRID_SIDE)))
    }

    /// Cell at (row, col)
    ///
    /// # Panics
    /// If `row` or `col` is 8 or more.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < GRID_SIDE && col < GRID_SIDE);
        self.cells[row * GRID_SIDE + col]
    }

    /// Same grid with one cell replaced
    pub fn with_cell(mut self, row: usize, col: usize, value: f32) -> Self {
        assert!(row < GRID_SIDE && col < GRID_SIDE);
        self.cells[row * GRID_SIDE + col] = value;
        self
    }

    /// Row-major cells
    pub fn cells(&self) -> &[f32; PIXEL_COUNT] {
        &self.cells
    }

    /// Smallest and largest cell
    pub fn min_max(&self) -> (f32, f32) {
        min_max(&self.cells).unwrap_or((0.0, 0.0))
    }
}

/// Upscaled N×N grid in °C
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGrid {
    side: usize,
    cells: Vec<f32>,
}

impl DisplayGrid {
    pub(crate) fn from_cells(side: usize, cells: Vec<f32>) -> Self {
        debug_assert_eq!(cells.len(), side * side);
        Self { side, cells }
    }

    /// Side length
    pub fn side(&self) -> usize {
        self.side
    }

    /// Cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.side && col < self.side);
        self.cells[row * self.side + col]
    }

    /// Row-major cells
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Smallest and largest cell, `None` for an empty grid
    pub fn min_max(&self) -> Option<(f32, f32)> {
        min_max(&self.cells)
    }
}

fn min_max(cells: &[f32]) -> Option<(f32, f32)> {
    let (&first, rest) = cells.split_first()?;
    Some(
        rest.iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let grid = TemperatureGrid::from_fn(|row, col| (row * 10 + col) as f32);
        assert_eq!(grid.get(0, 0), 0.0);
        assert_eq!(grid.get(2, 5), 25.0);
        assert_eq!(grid.cells()[2 * 8 + 5], 25.0);
    }

    #[test]
    fn test_min_max() {
        let grid = TemperatureGrid::filled(20.0).with_cell(4, 4, 30.0).with_cell(0, 7, 18.5);
        assert_eq!(grid.min_max(), (18.5, 30.0));

        let display = DisplayGrid::from_cells(2, vec![1.0, -2.0, 3.0, 0.5]);
        assert_eq!(display.min_max(), Some((-2.0, 3.0)));
        assert_eq!(DisplayGrid::from_cells(0, Vec::new()).min_max(), None);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        TemperatureGrid::filled(0.0).get(8, 0);
    }
}
