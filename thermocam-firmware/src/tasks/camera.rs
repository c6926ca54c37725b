//! Camera task
//!
//! Runs one acquisition cycle per tick. The controller skips the bus
//! entirely while nobody is subscribed.

use defmt::*;
use embassy_time::{Duration, Ticker};
use thermocam_core::traits::FrameSink;
use thermocam_core::{AcquisitionController, CycleOutcome};
use thermocam_protocol::RawFrame;

use crate::channels::{GATE, LATEST_FRAME, OUTBOUND_FRAME};
use crate::{BoardLed, BoardSensor};

/// Log cycle counters every this many ticks
const STATS_INTERVAL_TICKS: u32 = 60;

/// Hands frames to the radio stack's notify path
struct NotifySink;

impl FrameSink for NotifySink {
    fn push(&mut self, frame: &RawFrame, frame_count: u32) {
        OUTBOUND_FRAME.signal((frame.clone(), frame_count));
    }
}

/// Camera task - owns the sensor and the status LED
#[embassy_executor::task]
pub async fn camera_task(sensor: BoardSensor, mut led: BoardLed, tick_interval_ms: u32) {
    info!("Camera task started");

    let mut controller = AcquisitionController::new(sensor);
    let mut sink = NotifySink;

    match controller.initialize(&mut led).await {
        Ok(()) => info!("Sensor initialized"),
        Err(e) => warn!("Sensor init failed: {:?}, continuing with defaults", e),
    }

    let mut ticker = Ticker::every(Duration::from_millis(tick_interval_ms as u64));
    let mut ticks: u32 = 0;

    loop {
        ticker.next().await;
        ticks = ticks.wrapping_add(1);

        match controller.run_cycle(&GATE, &mut sink, &mut led).await {
            CycleOutcome::Skipped => {}
            CycleOutcome::Delivered { frame_count } => {
                trace!("Frame {} delivered", frame_count);
            }
            CycleOutcome::Withheld { frame_count } => {
                debug!("Frame {} withheld, viewer left", frame_count);
            }
            CycleOutcome::Fault(fault) => {
                warn!("Capture failed: {:?}", fault);
            }
        }

        if let Some(frame) = controller.latest_frame() {
            LATEST_FRAME.lock(|cell| *cell.borrow_mut() = Some(frame.clone()));
        }

        if ticks % STATS_INTERVAL_TICKS == 0 {
            info!("Camera stats: {:?}", controller.stats());
        }
    }
}
