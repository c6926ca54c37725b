//! Hardware abstraction traits
//!
//! These traits define the interface between the acquisition logic
//! and hardware-specific implementations.

pub mod sensor;

pub use sensor::{FaultIndicator, FrameSink, SensorError, ThermalSensor};
