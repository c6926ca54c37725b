//! Reconstruction pipeline
//!
//! One call per received notification: decode → resample → colorize. The
//! reconstructor owns the exposure window and the weight cache, so it must
//! not run two frames at once.

use thermocam_protocol::RawFrame;
use tracing::{debug, trace};

use crate::colorize::{colorize, map_cells, PixelBuffer};
use crate::config::{ExposureSource, ViewerConfig};
use crate::decode::{decode_with, SignPolicy};
use crate::error::Result;
use crate::exposure::ExposureWindow;
use crate::grid::{DisplayGrid, TemperatureGrid};
use crate::palette::ColorGradient;
use crate::resample::Resampler;

/// Output of one reconstruction
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Number of frames reconstructed before this one
    pub sequence: u64,
    /// Decoded sensor temperatures
    pub temperatures: TemperatureGrid,
    /// Upscaled temperatures
    pub display: DisplayGrid,
    /// Color-mapped image and the exposure range used
    pub image: PixelBuffer,
}

impl RenderedFrame {
    /// Exposure (min, max) after this frame
    pub fn window(&self) -> Option<(f32, f32)> {
        self.image.window()
    }
}

/// Stateful frame-to-image converter
#[derive(Debug)]
pub struct Reconstructor {
    side: usize,
    sign_policy: SignPolicy,
    exposure_source: ExposureSource,
    resampler: Resampler,
    exposure: ExposureWindow,
    gradient: ColorGradient,
    frames: u64,
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::from_valid_config(&ViewerConfig::default())
    }
}

impl Reconstructor {
    /// Create a reconstructor from a configuration
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &ViewerConfig) -> Self {
        Self {
            side: config.output_side,
            sign_policy: config.sign_policy,
            exposure_source: config.exposure_source,
            resampler: Resampler::new(config.weight_cache_capacity),
            exposure: ExposureWindow::with_epsilon(config.exposure_epsilon),
            gradient: ColorGradient::iron(),
            frames: 0,
        }
    }

    /// Reconstruct a notification payload
    ///
    /// A payload that is not exactly one frame is rejected and leaves the
    /// exposure window untouched.
    pub fn process(&mut self, payload: &[u8]) -> Result<RenderedFrame> {
        let frame = RawFrame::from_slice(payload)?;
        Ok(self.process_frame(&frame))
    }

    /// Reconstruct a frame
    pub fn process_frame(&mut self, frame: &RawFrame) -> RenderedFrame {
        let temperatures = decode_with(frame, self.sign_policy);
        self.render(temperatures)
    }

    /// Resample and colorize an already decoded grid
    pub fn render(&mut self, temperatures: TemperatureGrid) -> RenderedFrame {
        let display = self.resampler.resample(&temperatures, self.side);

        let image = match self.exposure_source {
            ExposureSource::Decoded => {
                let (lo, hi) = temperatures.min_max();
                self.exposure.observe(lo, hi);
                map_cells(&display, &self.exposure, &self.gradient)
            }
            ExposureSource::Resampled => colorize(&display, &mut self.exposure, &self.gradient),
        };

        let sequence = self.frames;
        self.frames += 1;
        trace!(sequence, window = ?self.exposure.bounds(), "frame reconstructed");

        RenderedFrame {
            sequence,
            temperatures,
            display,
            image,
        }
    }

    /// Forget the exposure range (for example after the viewer reconnects)
    pub fn reset_exposure(&mut self) {
        debug!("exposure window reset");
        self.exposure.reset();
    }

    /// Current exposure window
    pub fn exposure(&self) -> &ExposureWindow {
        &self.exposure
    }

    /// Output side length
    pub fn side(&self) -> usize {
        self.side
    }

    /// Frames reconstructed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
