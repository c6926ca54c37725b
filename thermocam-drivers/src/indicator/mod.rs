//! Fault indicators

pub mod led;

pub use led::FaultLed;
