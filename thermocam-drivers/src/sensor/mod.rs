//! Thermal sensor drivers

pub mod grideye;

pub use grideye::GridEye;
