//! Transport events
//!
//! The wireless stack reports connection activity through these events.
//! The device core only consumes them; producing them is the transport's job.

/// Connection handle assigned by the BLE stack
pub type ConnHandle = u16;

/// Attribute handle of a GATT characteristic value
pub type AttrHandle = u16;

/// Events raised by the wireless transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportEvent {
    /// A central connected
    Connected {
        /// Connection handle
        conn: ConnHandle,
    },
    /// A central changed its notification subscription (CCCD write)
    SubscriptionChanged {
        /// Connection handle
        conn: ConnHandle,
        /// Characteristic the subscription refers to
        attr: AttrHandle,
        /// Notifications now enabled
        notify: bool,
    },
    /// The connection was terminated
    Disconnected {
        /// Connection handle
        conn: ConnHandle,
        /// HCI disconnect reason code
        reason: u8,
    },
}

impl TransportEvent {
    /// Connection this event belongs to
    pub fn conn(&self) -> ConnHandle {
        match self {
            TransportEvent::Connected { conn }
            | TransportEvent::SubscriptionChanged { conn, .. }
            | TransportEvent::Disconnected { conn, .. } => *conn,
        }
    }
}
