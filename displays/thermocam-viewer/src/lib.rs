//! Receiver-side reconstruction pipeline for Thermocam frames
//!
//! Turns each 128-byte notification from the sensor into an N×N buffer of
//! packed 32-bit pixels:
//!
//! ```text
//! RawFrame ──decode──▶ TemperatureGrid (8×8) ──resample──▶ DisplayGrid (N×N)
//!                                                              │
//!                           ExposureWindow (caller-owned) ◀──colorize──▶ PixelBuffer
//! ```
//!
//! - `decode`: fixed-point pixel words to °C
//! - `resample`: Lanczos-3 upscaling with clamped edges and a bounded weight cache
//! - `exposure` / `palette` / `colorize`: auto-exposure and gradient lookup
//! - `pipeline`: the three steps glued together for one notification
//! - `handoff`: runs the pipeline on a worker thread with latest-wins slots
//!
//! The GUI shell, the BLE client and logging setup are collaborators; this
//! crate only emits `tracing` events and never installs a subscriber.

#![deny(unsafe_code)]

pub mod colorize;
pub mod config;
pub mod decode;
pub mod error;
pub mod exposure;
pub mod grid;
pub mod handoff;
pub mod palette;
pub mod pipeline;
pub mod resample;

pub use colorize::{colorize, PixelBuffer};
pub use config::{ExposureSource, ViewerConfig};
pub use decode::{decode, decode_bytes, decode_with, SignPolicy};
pub use error::{ConfigError, ViewerError};
pub use exposure::ExposureWindow;
pub use grid::{DisplayGrid, TemperatureGrid};
pub use handoff::ViewerWorker;
pub use palette::ColorGradient;
pub use pipeline::{Reconstructor, RenderedFrame};
pub use resample::{lanczos, resample, sinc, Resampler, WeightCache};
