//! Off-thread reconstruction with latest-wins handoffs
//!
//! The transport callback submits payloads and the UI picks up finished
//! images; both sides go through single-slot signals, so a slow consumer
//! only ever sees the newest frame and nothing queues up. One worker thread
//! runs the pipeline, which keeps the exposure window single-writer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use pollster::block_on;
use thermocam_protocol::RawFrame;
use tracing::{debug, trace, warn};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::pipeline::{Reconstructor, RenderedFrame};

enum Inbound {
    Frame(RawFrame),
    Shutdown,
}

struct Shared {
    /// Latest payload waiting for the worker
    input: Signal<CriticalSectionRawMutex, Inbound>,
    /// Latest finished image; `None` once the worker has exited
    output: Signal<CriticalSectionRawMutex, Option<RenderedFrame>>,
    reset_requested: AtomicBool,
    stopped: AtomicBool,
}

/// Handle to the reconstruction worker thread
pub struct ViewerWorker {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl ViewerWorker {
    /// Start a worker with the given configuration
    pub fn spawn(config: &ViewerConfig) -> Result<Self> {
        let reconstructor = Reconstructor::new(config)?;
        let shared = Arc::new(Shared {
            input: Signal::new(),
            output: Signal::new(),
            reset_requested: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
        });

        let worker_shared = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("thermocam-viewer".into())
            .spawn(move || run(worker_shared, reconstructor))
            .map_err(ViewerError::Spawn)?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Hand a received notification to the worker
    ///
    /// Replaces any payload the worker has not started on yet. A payload
    /// that is not exactly one frame is rejected here.
    pub fn submit(&self, payload: &[u8]) -> Result<()> {
        let frame = RawFrame::from_slice(payload)?;
        self.submit_frame(frame)
    }

    /// Hand an already validated frame to the worker
    pub fn submit_frame(&self, frame: RawFrame) -> Result<()> {
        if self.shared.stopped.load(Ordering::Acquire) {
            return Err(ViewerError::WorkerStopped);
        }
        self.shared.input.signal(Inbound::Frame(frame));
        Ok(())
    }

    /// Take the newest finished image, if one is waiting
    pub fn try_latest(&self) -> Option<RenderedFrame> {
        match self.shared.output.try_take()? {
            Some(frame) => Some(frame),
            None => {
                // Keep the stop marker visible for later callers
                self.shared.output.signal(None);
                None
            }
        }
    }

    /// Block until the next finished image
    pub fn wait_frame(&self) -> Result<RenderedFrame> {
        match block_on(self.shared.output.wait()) {
            Some(frame) => Ok(frame),
            None => {
                self.shared.output.signal(None);
                Err(ViewerError::WorkerStopped)
            }
        }
    }

    /// Reset the exposure window before the next frame is reconstructed
    pub fn reset_exposure(&self) {
        self.shared.reset_requested.store(true, Ordering::Release);
    }

    /// Check if the worker is still accepting frames
    pub fn is_running(&self) -> bool {
        !self.shared.stopped.load(Ordering::Acquire)
    }

    /// Stop the worker and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shared.stopped.store(true, Ordering::Release);
        self.shared.input.signal(Inbound::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("reconstruction worker panicked");
            }
        }
    }
}

impl Drop for ViewerWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(shared: Arc<Shared>, mut reconstructor: Reconstructor) {
    debug!(side = reconstructor.side(), "reconstruction worker started");

    block_on(async {
        loop {
            match shared.input.wait().await {
                Inbound::Shutdown => break,
                Inbound::Frame(frame) => {
                    if shared.reset_requested.swap(false, Ordering::AcqRel) {
                        reconstructor.reset_exposure();
                    }
                    let rendered = reconstructor.process_frame(&frame);
                    trace!(sequence = rendered.sequence, "frame handed off");
                    shared.output.signal(Some(rendered));
                }
            }
            // A frame may have replaced the shutdown request in the slot
            if shared.stopped.load(Ordering::Acquire) {
                break;
            }
        }
    });

    shared.output.signal(None);
    debug!(frames = reconstructor.frames(), "reconstruction worker stopped");
}
