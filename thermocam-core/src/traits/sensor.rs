//! Thermal sensor, frame sink and fault indicator traits

use core::future::Future;

use thermocam_protocol::RawFrame;

use crate::acquisition::CycleFault;

/// Errors that can occur while talking to the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not acknowledge its address
    NoResponse,
    /// Bus transfer exceeded its timeout
    Timeout,
    /// Electrical or protocol error on the bus
    Bus,
}

/// Trait for frame-capturing thermal sensors
///
/// A capture is a two-step interaction: trigger, then read the pixel block.
/// Implementations perform exactly one bus transfer per call so the caller
/// controls retry policy.
pub trait ThermalSensor {
    /// One-time setup before the first capture (frame rate, mode)
    fn initialize(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Request a new capture
    fn trigger_capture(&mut self) -> impl Future<Output = Result<(), SensorError>>;

    /// Read the captured pixel block into `frame`
    ///
    /// On error the contents of `frame` are unspecified.
    fn read_frame(&mut self, frame: &mut RawFrame) -> impl Future<Output = Result<(), SensorError>>;
}

/// Destination for completed frames (the transport's notify primitive)
pub trait FrameSink {
    /// Push one frame to the subscriber
    ///
    /// `frame_count` is the diagnostic sequence number of this frame.
    fn push(&mut self, frame: &RawFrame, frame_count: u32);
}

/// External indicator for recoverable faults (typically an LED)
pub trait FaultIndicator {
    /// A cycle failed
    fn fault(&mut self, fault: CycleFault);

    /// A cycle succeeded after earlier faults
    fn clear(&mut self) {}
}

/// No indicator attached
impl FaultIndicator for () {
    fn fault(&mut self, _fault: CycleFault) {}
}
