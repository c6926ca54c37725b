//! Acquisition controller
//!
//! Runs one capture cycle per tick:
//!
//! 1. Gate closed → nothing happens (no bus traffic)
//! 2. Trigger capture; on failure report a fault and wait for the next tick
//! 3. Read the pixel block; on failure report a fault and wait for the next tick
//! 4. Store the frame (single slot, latest wins) and push it if the gate is
//!    still open
//!
//! There is no retry inside a cycle: the next tick is the retry.

use thermocam_protocol::RawFrame;

use crate::gate::DeliveryGate;
use crate::traits::{FaultIndicator, FrameSink, SensorError, ThermalSensor};

/// Which step of a cycle failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleFault {
    /// One-time sensor setup failed
    Init(SensorError),
    /// Capture trigger write failed
    Trigger(SensorError),
    /// Pixel block read failed
    Read(SensorError),
}

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// Nobody subscribed; no bus traffic
    Skipped,
    /// Frame captured and pushed
    Delivered {
        /// Sequence number of the frame
        frame_count: u32,
    },
    /// Frame captured but the subscriber left before the push
    Withheld {
        /// Sequence number of the frame
        frame_count: u32,
    },
    /// Bus fault; retried on the next tick
    Fault(CycleFault),
}

/// Running cycle counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleStats {
    pub delivered: u32,
    pub skipped: u32,
    pub withheld: u32,
    pub trigger_faults: u32,
    pub read_faults: u32,
}

impl CycleStats {
    fn record(&mut self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Skipped => self.skipped = self.skipped.wrapping_add(1),
            CycleOutcome::Delivered { .. } => self.delivered = self.delivered.wrapping_add(1),
            CycleOutcome::Withheld { .. } => self.withheld = self.withheld.wrapping_add(1),
            CycleOutcome::Fault(CycleFault::Trigger(_)) => {
                self.trigger_faults = self.trigger_faults.wrapping_add(1)
            }
            CycleOutcome::Fault(CycleFault::Read(_)) => {
                self.read_faults = self.read_faults.wrapping_add(1)
            }
            CycleOutcome::Fault(CycleFault::Init(_)) => {}
        }
    }
}

/// Drives the sensor and forwards completed frames
pub struct AcquisitionController<S> {
    sensor: S,
    /// Latest completed frame
    frame: RawFrame,
    /// Completed captures since boot
    frame_count: u32,
    stats: CycleStats,
}

impl<S: ThermalSensor> AcquisitionController<S> {
    /// Create a new controller around a sensor
    pub fn new(sensor: S) -> Self {
        Self {
            sensor,
            frame: RawFrame::zeroed(),
            frame_count: 0,
            stats: CycleStats::default(),
        }
    }

    /// Run the one-time sensor setup
    ///
    /// A failure is reported to the indicator and returned, but the
    /// controller stays usable: the sensor's power-on defaults still
    /// produce frames.
    pub async fn initialize<I: FaultIndicator>(&mut self, faults: &mut I) -> Result<(), SensorError> {
        self.sensor.initialize().await.inspect_err(|&e| {
            faults.fault(CycleFault::Init(e));
        })
    }

    /// Run one acquisition cycle
    pub async fn run_cycle<F: FrameSink, I: FaultIndicator>(
        &mut self,
        gate: &DeliveryGate,
        sink: &mut F,
        faults: &mut I,
    ) -> CycleOutcome {
        let outcome = self.cycle(gate, sink, faults).await;
        self.stats.record(&outcome);
        outcome
    }

    async fn cycle<F: FrameSink, I: FaultIndicator>(
        &mut self,
        gate: &DeliveryGate,
        sink: &mut F,
        faults: &mut I,
    ) -> CycleOutcome {
        if !gate.is_subscribed() {
            return CycleOutcome::Skipped;
        }

        if let Err(e) = self.sensor.trigger_capture().await {
            let fault = CycleFault::Trigger(e);
            faults.fault(fault);
            return CycleOutcome::Fault(fault);
        }

        // Read into scratch so a failed transfer never corrupts the stored frame
        let mut scratch = RawFrame::zeroed();
        if let Err(e) = self.sensor.read_frame(&mut scratch).await {
            let fault = CycleFault::Read(e);
            faults.fault(fault);
            return CycleOutcome::Fault(fault);
        }

        faults.clear();
        self.frame_count = self.frame_count.wrapping_add(1);
        self.frame = scratch;

        if gate.is_subscribed() {
            sink.push(&self.frame, self.frame_count);
            CycleOutcome::Delivered {
                frame_count: self.frame_count,
            }
        } else {
            CycleOutcome::Withheld {
                frame_count: self.frame_count,
            }
        }
    }

    /// Latest completed frame, if any capture has succeeded
    pub fn latest_frame(&self) -> Option<&RawFrame> {
        (self.frame_count > 0).then_some(&self.frame)
    }

    /// Number of completed captures
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Cycle counters
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Get access to the underlying sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    /// Sensor double that counts bus operations and fails on demand
    #[derive(Default)]
    struct ScriptedSensor {
        triggers: u32,
        reads: u32,
        fail_trigger: Option<SensorError>,
        fail_read: Option<SensorError>,
        fill: u8,
    }

    impl ThermalSensor for ScriptedSensor {
        async fn initialize(&mut self) -> Result<(), SensorError> {
            Ok(())
        }

        async fn trigger_capture(&mut self) -> Result<(), SensorError> {
            self.triggers += 1;
            match self.fail_trigger {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        async fn read_frame(&mut self, frame: &mut RawFrame) -> Result<(), SensorError> {
            self.reads += 1;
            frame.as_mut_bytes().fill(self.fill);
            match self.fail_read {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct CountingSink {
        pushes: u32,
        last_count: u32,
        last_first_byte: u8,
    }

    impl FrameSink for CountingSink {
        fn push(&mut self, frame: &RawFrame, frame_count: u32) {
            self.pushes += 1;
            self.last_count = frame_count;
            self.last_first_byte = frame.as_bytes()[0];
        }
    }

    #[derive(Default)]
    struct RecordingIndicator {
        faults: u32,
        clears: u32,
        last: Option<CycleFault>,
    }

    impl FaultIndicator for RecordingIndicator {
        fn fault(&mut self, fault: CycleFault) {
            self.faults += 1;
            self.last = Some(fault);
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    /// Sensor that sees the viewer leave while the frame is in flight
    struct GateClosingSensor<'a> {
        gate: &'a DeliveryGate,
    }

    impl ThermalSensor for GateClosingSensor<'_> {
        async fn initialize(&mut self) -> Result<(), SensorError> {
            Ok(())
        }

        async fn trigger_capture(&mut self) -> Result<(), SensorError> {
            Ok(())
        }

        async fn read_frame(&mut self, _frame: &mut RawFrame) -> Result<(), SensorError> {
            self.gate.set_subscribed(false);
            Ok(())
        }
    }

    #[test]
    fn test_closed_gate_means_no_bus_traffic() {
        let gate = DeliveryGate::new();
        let mut sink = CountingSink::default();
        let mut ctrl = AcquisitionController::new(ScriptedSensor::default());

        for _ in 0..50 {
            let outcome = block_on(ctrl.run_cycle(&gate, &mut sink, &mut ()));
            assert_eq!(outcome, CycleOutcome::Skipped);
        }

        assert_eq!(ctrl.sensor().triggers, 0);
        assert_eq!(ctrl.sensor().reads, 0);
        assert_eq!(sink.pushes, 0);
        assert_eq!(ctrl.stats().skipped, 50);
        assert!(ctrl.latest_frame().is_none());
    }

    #[test]
    fn test_open_gate_one_pair_per_tick() {
        let gate = DeliveryGate::new();
        let mut sink = CountingSink::default();
        let mut ctrl = AcquisitionController::new(ScriptedSensor::default());

        gate.set_subscribed(true);
        for tick in 1..=5u32 {
            let outcome = block_on(ctrl.run_cycle(&gate, &mut sink, &mut ()));
            assert_eq!(outcome, CycleOutcome::Delivered { frame_count: tick });
            assert_eq!(ctrl.sensor().triggers, tick);
            assert_eq!(ctrl.sensor().reads, tick);
        }

        gate.set_subscribed(false);
        for _ in 0..5 {
            block_on(ctrl.run_cycle(&gate, &mut sink, &mut ()));
        }
        assert_eq!(ctrl.sensor().triggers, 5);
        assert_eq!(ctrl.sensor().reads, 5);
        assert_eq!(sink.pushes, 5);
        assert_eq!(sink.last_count, 5);
    }

    #[test]
    fn test_trigger_fault_skips_read() {
        let gate = DeliveryGate::new();
        gate.set_subscribed(true);
        let mut sink = CountingSink::default();
        let mut faults = RecordingIndicator::default();
        let sensor = ScriptedSensor {
            fail_trigger: Some(SensorError::NoResponse),
            ..Default::default()
        };
        let mut ctrl = AcquisitionController::new(sensor);

        let outcome = block_on(ctrl.run_cycle(&gate, &mut sink, &mut faults));

        assert_eq!(
            outcome,
            CycleOutcome::Fault(CycleFault::Trigger(SensorError::NoResponse))
        );
        assert_eq!(ctrl.sensor().triggers, 1);
        assert_eq!(ctrl.sensor().reads, 0);
        assert_eq!(sink.pushes, 0);
        assert_eq!(faults.faults, 1);
        assert_eq!(ctrl.frame_count(), 0);
        assert_eq!(ctrl.stats().trigger_faults, 1);
    }

    #[test]
    fn test_read_fault_keeps_previous_frame() {
        let gate = DeliveryGate::new();
        gate.set_subscribed(true);
        let mut sink = CountingSink::default();
        let mut faults = RecordingIndicator::default();
        let mut ctrl = AcquisitionController::new(ScriptedSensor {
            fill: 0x11,
            ..Default::default()
        });

        block_on(ctrl.run_cycle(&gate, &mut sink, &mut faults));
        assert_eq!(ctrl.frame_count(), 1);

        // Next read scribbles 0x22 then fails
        ctrl.sensor.fill = 0x22;
        ctrl.sensor.fail_read = Some(SensorError::Timeout);
        let outcome = block_on(ctrl.run_cycle(&gate, &mut sink, &mut faults));

        assert_eq!(
            outcome,
            CycleOutcome::Fault(CycleFault::Read(SensorError::Timeout))
        );
        assert_eq!(ctrl.frame_count(), 1);
        assert_eq!(ctrl.latest_frame().unwrap().as_bytes()[0], 0x11);
        assert_eq!(sink.pushes, 1);
        assert_eq!(faults.last, Some(CycleFault::Read(SensorError::Timeout)));
    }

    #[test]
    fn test_recovers_on_next_tick() {
        let gate = DeliveryGate::new();
        gate.set_subscribed(true);
        let mut sink = CountingSink::default();
        let mut faults = RecordingIndicator::default();
        let mut ctrl = AcquisitionController::new(ScriptedSensor {
            fail_trigger: Some(SensorError::Bus),
            ..Default::default()
        });

        block_on(ctrl.run_cycle(&gate, &mut sink, &mut faults));
        ctrl.sensor.fail_trigger = None;
        let outcome = block_on(ctrl.run_cycle(&gate, &mut sink, &mut faults));

        assert_eq!(outcome, CycleOutcome::Delivered { frame_count: 1 });
        assert_eq!(faults.faults, 1);
        assert_eq!(faults.clears, 1);
    }

    #[test]
    fn test_gate_closed_mid_cycle_withholds_push() {
        let gate = DeliveryGate::new();
        gate.set_subscribed(true);
        let mut sink = CountingSink::default();
        let mut ctrl = AcquisitionController::new(GateClosingSensor { gate: &gate });

        let outcome = block_on(ctrl.run_cycle(&gate, &mut sink, &mut ()));

        assert_eq!(outcome, CycleOutcome::Withheld { frame_count: 1 });
        assert_eq!(sink.pushes, 0);
        assert!(ctrl.latest_frame().is_some());
        assert_eq!(ctrl.stats().withheld, 1);
    }

    #[test]
    fn test_pushed_frame_is_latest() {
        let gate = DeliveryGate::new();
        gate.set_subscribed(true);
        let mut sink = CountingSink::default();
        let mut ctrl = AcquisitionController::new(ScriptedSensor {
            fill: 0x5A,
            ..Default::default()
        });

        block_on(ctrl.run_cycle(&gate, &mut sink, &mut ()));
        assert_eq!(sink.last_first_byte, 0x5A);
        assert_eq!(ctrl.latest_frame().unwrap().as_bytes()[127], 0x5A);
    }
}
