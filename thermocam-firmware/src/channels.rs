//! Inter-task communication channels
//!
//! Static state shared between the camera task, the link task and the
//! radio stack glue in `transport`.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use thermocam_core::DeliveryGate;
use thermocam_protocol::{RawFrame, TransportEvent};

/// Channel capacity for transport events
const TRANSPORT_CHANNEL_SIZE: usize = 8;

/// Subscriber-present flag (opened by the link task, closed early by the transport on disconnect)
pub static GATE: DeliveryGate = DeliveryGate::new();

/// Connection and subscription events from the radio stack
pub static TRANSPORT_EVENTS: Channel<CriticalSectionRawMutex, TransportEvent, TRANSPORT_CHANNEL_SIZE> =
    Channel::new();

/// Frame waiting to be sent as a notification, with its sequence number
///
/// Single slot: an unsent frame is replaced by the next one.
pub static OUTBOUND_FRAME: Signal<CriticalSectionRawMutex, (RawFrame, u32)> = Signal::new();

/// Latest completed frame, served to characteristic reads
pub static LATEST_FRAME: Mutex<CriticalSectionRawMutex, RefCell<Option<RawFrame>>> =
    Mutex::new(RefCell::new(None));
