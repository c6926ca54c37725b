//! Lanczos-3 image resampler
//!
//! The 8×8 source covers [-0.5, 7.5] on both axes with a sample at every
//! integer. An N×N output covers the same range with evenly spaced sample
//! centres. Each output cell is the normalized weighted sum of the source
//! cells within ±2 of its two nearest source rows and columns; indices
//! outside the grid are clamped to the edge, weights use the unclamped
//! distance.

use std::collections::HashMap;
use std::f32::consts::PI;

use tracing::{debug, warn};

use crate::grid::{DisplayGrid, TemperatureGrid};

/// Number of kernel lobes
pub const LOBES: f32 = 3.0;

/// Neighbourhood radius beyond the nearest source sample
const REACH: i32 = 2;

/// Distances are cached at 1/4096 of a source pixel
const QUANTUM: f32 = 4096.0;

/// Default number of cached weight products
pub const DEFAULT_CACHE_CAPACITY: usize = 1 << 16;

const SOURCE_SIDE: usize = TemperatureGrid::SIDE;
const SOURCE_MAX: i32 = SOURCE_SIDE as i32 - 1;

/// Normalized sinc, `sin(πx) / (πx)` with `sinc(0) = 1`
pub fn sinc(x: f32) -> f32 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Lanczos-3 kernel, zero outside (-3, 3)
pub fn lanczos(d: f32) -> f32 {
    if d.abs() >= LOBES {
        0.0
    } else {
        sinc(d) * sinc(d / LOBES)
    }
}

/// Source coordinate of output sample `index` out of `side`
pub fn sample_centre(index: usize, side: usize) -> f32 {
    let step = SOURCE_SIDE as f32 / side as f32;
    -0.5 + step / 2.0 + index as f32 * step
}

/// Bounded memo of `lanczos(d_row) * lanczos(d_col)`
///
/// Keys are the distances quantized to [`QUANTUM`] steps and the weight is
/// computed from the quantized distances, so a hit and a miss for the same
/// key yield the same value. Once full, new products are computed without
/// being stored.
#[derive(Debug)]
pub struct WeightCache {
    entries: HashMap<(i32, i32), f32>,
    capacity: usize,
    hits: u64,
    misses: u64,
    saturated: bool,
}

impl WeightCache {
    /// Create a cache holding at most `capacity` products
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
            capacity,
            hits: 0,
            misses: 0,
            saturated: false,
        }
    }

    /// Weight for a pair of signed distances
    pub fn weight(&mut self, d_row: f32, d_col: f32) -> f32 {
        let key = (quantize(d_row), quantize(d_col));
        if let Some(&w) = self.entries.get(&key) {
            self.hits += 1;
            return w;
        }

        self.misses += 1;
        let w = lanczos(key.0 as f32 / QUANTUM) * lanczos(key.1 as f32 / QUANTUM);
        if self.entries.len() < self.capacity {
            self.entries.insert(key, w);
        } else if !self.saturated {
            self.saturated = true;
            warn!(capacity = self.capacity, "weight cache full, computing uncached");
        }
        w
    }

    /// Number of cached products
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached products
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for WeightCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

fn quantize(d: f32) -> i32 {
    (d * QUANTUM).round() as i32
}

/// Resampler with a weight cache that persists across frames
#[derive(Debug, Default)]
pub struct Resampler {
    cache: WeightCache,
}

impl Resampler {
    /// Create a resampler whose cache holds at most `capacity` products
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: WeightCache::new(cache_capacity),
        }
    }

    /// The weight cache
    pub fn cache(&self) -> &WeightCache {
        &self.cache
    }

    /// Upscale an 8×8 grid to `side`×`side`
    pub fn resample(&mut self, grid: &TemperatureGrid, side: usize) -> DisplayGrid {
        let centres: Vec<f32> = (0..side).map(|i| sample_centre(i, side)).collect();
        let mut cells = Vec::with_capacity(side * side);

        for &f_row in &centres {
            for &f_col in &centres {
                cells.push(self.cell(grid, f_row, f_col));
            }
        }

        let (hits, misses) = self.cache.stats();
        debug!(side, cached = self.cache.len(), hits, misses, "resampled frame");
        DisplayGrid::from_cells(side, cells)
    }

    fn cell(&mut self, grid: &TemperatureGrid, f_row: f32, f_col: f32) -> f32 {
        let mut accumulator = 0.0f32;
        let mut total_weight = 0.0f32;

        for source_row in window(f_row) {
            let d_row = f_row - source_row as f32;
            let row = clamp_index(source_row);
            for source_col in window(f_col) {
                let d_col = f_col - source_col as f32;
                let w = self.cache.weight(d_row, d_col);
                accumulator += w * grid.get(row, clamp_index(source_col));
                total_weight += w;
            }
        }

        if total_weight.abs() > f32::EPSILON {
            accumulator / total_weight
        } else {
            // Unreachable for Lanczos-3 with a ±2 window
            grid.get(clamp_index(f_row.round() as i32), clamp_index(f_col.round() as i32))
        }
    }
}

/// Upscale with a throwaway cache
pub fn resample(grid: &TemperatureGrid, side: usize) -> DisplayGrid {
    Resampler::default().resample(grid, side)
}

fn window(f: f32) -> std::ops::RangeInclusive<i32> {
    (f.floor() as i32 - REACH)..=(f.ceil() as i32 + REACH)
}

fn clamp_index(i: i32) -> usize {
    i.clamp(0, SOURCE_MAX) as usize
}
