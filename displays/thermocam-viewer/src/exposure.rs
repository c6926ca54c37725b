//! Auto-exposure window
//!
//! A running (min, max) range that only ever widens, so the image slowly
//! settles instead of re-normalizing every frame. The window belongs to the
//! caller; resetting it (for example on reconnect) is the caller's decision.

use tracing::trace;

/// Widening applied when the window would otherwise have zero width
pub const DEFAULT_EPSILON: f32 = 0.25;

/// Running min/max exposure range in °C
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureWindow {
    bounds: Option<(f32, f32)>,
    epsilon: f32,
}

impl Default for ExposureWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureWindow {
    /// Empty window, seeded by the first observation
    pub const fn new() -> Self {
        Self::with_epsilon(DEFAULT_EPSILON)
    }

    /// Empty window with a custom degenerate-range widening
    pub const fn with_epsilon(epsilon: f32) -> Self {
        Self {
            bounds: None,
            epsilon,
        }
    }

    /// Window pre-seeded with a range
    pub fn seeded(min: f32, max: f32) -> Self {
        let mut window = Self::new();
        window.observe(min, max);
        window
    }

    /// Widen the window to include `[lo, hi]`
    ///
    /// Returns true if the bounds changed. Non-finite values are ignored.
    pub fn observe(&mut self, lo: f32, hi: f32) -> bool {
        if !lo.is_finite() || !hi.is_finite() {
            return false;
        }
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

        let before = self.bounds;
        let (min, mut max) = match self.bounds {
            Some((min, max)) => (min.min(lo), max.max(hi)),
            None => (lo, hi),
        };
        if min == max {
            max = min + self.epsilon;
        }

        self.bounds = Some((min, max));
        let changed = before != self.bounds;
        if changed {
            trace!(min, max, "exposure window widened");
        }
        changed
    }

    /// Current (min, max), `None` before the first observation
    pub fn bounds(&self) -> Option<(f32, f32)> {
        self.bounds
    }

    /// Check if the window has been seeded
    pub fn is_seeded(&self) -> bool {
        self.bounds.is_some()
    }

    /// Degenerate-range widening
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Forget the range; the next observation seeds it again
    pub fn reset(&mut self) {
        self.bounds = None;
    }

    /// Map a value onto a 0..=255 level
    ///
    /// Values outside the window are clamped. An unseeded window maps
    /// everything to 0.
    pub fn level(&self, value: f32) -> u8 {
        let Some((min, max)) = self.bounds else {
            return 0;
        };
        let scaled = (value - min) / (max - min) * 255.0;
        // NaN falls through clamp unchanged and `as` turns it into 0
        scaled.clamp(0.0, 255.0) as u8
    }
}
