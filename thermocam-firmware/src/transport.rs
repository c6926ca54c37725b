//! Radio stack boundary
//!
//! The BLE stack runs outside this crate. Its GATT server glue calls the
//! `on_*` hooks from its connection and CCCD-write callbacks, sends whatever
//! `next_notification` yields on the image characteristic, and answers reads
//! with `read_latest_frame`. None of them are called from inside this crate.

use defmt::*;
use thermocam_protocol::events::{AttrHandle, ConnHandle};
use thermocam_protocol::{RawFrame, TransportEvent};

use crate::channels::{GATE, LATEST_FRAME, OUTBOUND_FRAME, TRANSPORT_EVENTS};

fn post(event: TransportEvent) {
    if TRANSPORT_EVENTS.try_send(event).is_err() {
        warn!("Transport event queue full, dropping {:?}", event);
    }
}

/// A central connected
#[allow(dead_code)]
pub fn on_connect(conn: ConnHandle) {
    post(TransportEvent::Connected { conn });
}

/// A central wrote the client characteristic configuration descriptor
#[allow(dead_code)]
pub fn on_subscription_changed(conn: ConnHandle, attr: AttrHandle, notify: bool) {
    post(TransportEvent::SubscriptionChanged { conn, attr, notify });
}

/// The connection dropped
///
/// Must run before the stack releases the connection. The gate closes here
/// and the teardown is latched, so a full event queue cannot lose it.
#[allow(dead_code)]
pub fn on_disconnect(conn: ConnHandle, reason: u8) {
    if GATE.tear_down(conn) {
        OUTBOUND_FRAME.reset();
    }
    post(TransportEvent::Disconnected { conn, reason });
}

/// Wait for the next frame to notify
#[allow(dead_code)]
pub async fn next_notification() -> (RawFrame, u32) {
    OUTBOUND_FRAME.wait().await
}

/// Frame returned for a plain characteristic read
///
/// All zero until the first capture completes.
#[allow(dead_code)]
pub fn read_latest_frame() -> RawFrame {
    LATEST_FRAME.lock(|cell| cell.borrow().clone().unwrap_or_default())
}
