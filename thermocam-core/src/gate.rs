//! Delivery gate
//!
//! A single flag saying whether a viewer is subscribed to frame
//! notifications. Opened by the link task, read from the camera task.
//! No work is done, and no bus traffic happens, while the gate is closed.
//!
//! The transport closes the gate itself when a connection goes away
//! ([`DeliveryGate::tear_down`]) and leaves the dead handle in a latch.
//! The link supervisor drains the latch before its next event, so the
//! teardown survives even if the queued disconnect event is dropped.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use thermocam_protocol::events::ConnHandle;

/// Latch value meaning "no connection"
const NO_CONN: u32 = u32::MAX;

/// Subscriber-present flag shared between tasks
#[derive(Debug)]
pub struct DeliveryGate {
    subscribed: AtomicBool,
    /// Connection the link supervisor currently follows
    tracked: AtomicU32,
    /// Connection torn down by the transport, not yet seen by the supervisor
    teardown: AtomicU32,
}

impl Default for DeliveryGate {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryGate {
    /// Create a closed gate
    pub const fn new() -> Self {
        Self {
            subscribed: AtomicBool::new(false),
            tracked: AtomicU32::new(NO_CONN),
            teardown: AtomicU32::new(NO_CONN),
        }
    }

    /// Open or close the gate
    pub fn set_subscribed(&self, subscribed: bool) {
        self.subscribed.store(subscribed, Ordering::Release);
    }

    /// Check if a subscriber is present
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }

    /// Close the gate for a connection that is going away
    ///
    /// Called from the transport before the connection is released. Returns
    /// `false`, leaving the gate alone, when `conn` is not the followed
    /// connection.
    pub fn tear_down(&self, conn: ConnHandle) -> bool {
        let tracked = self.tracked.load(Ordering::Acquire);
        if tracked != NO_CONN && tracked != u32::from(conn) {
            return false;
        }
        // Latch first: a supervisor that opens the gate after this point
        // drains the latch on its next event and closes it again
        self.teardown.store(u32::from(conn), Ordering::Release);
        self.subscribed.store(false, Ordering::Release);
        true
    }

    /// Check if a teardown is waiting for the supervisor
    pub fn teardown_pending(&self) -> bool {
        self.teardown.load(Ordering::Acquire) != NO_CONN
    }

    pub(crate) fn track(&self, conn: Option<ConnHandle>) {
        let value = conn.map_or(NO_CONN, u32::from);
        self.tracked.store(value, Ordering::Release);
    }

    pub(crate) fn take_teardown(&self) -> Option<ConnHandle> {
        match self.teardown.swap(NO_CONN, Ordering::AcqRel) {
            NO_CONN => None,
            // Only ever stored from a ConnHandle
            value => ConnHandle::try_from(value).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let gate = DeliveryGate::new();
        assert!(!gate.is_subscribed());
        assert!(!gate.teardown_pending());
    }

    #[test]
    fn test_latest_write_wins() {
        let gate = DeliveryGate::new();
        gate.set_subscribed(true);
        assert!(gate.is_subscribed());
        gate.set_subscribed(true);
        gate.set_subscribed(false);
        assert!(!gate.is_subscribed());
    }

    #[test]
    fn test_usable_as_static() {
        static GATE: DeliveryGate = DeliveryGate::new();
        GATE.set_subscribed(true);
        assert!(GATE.is_subscribed());
        GATE.set_subscribed(false);
    }

    #[test]
    fn test_tear_down_tracked_connection() {
        let gate = DeliveryGate::new();
        gate.track(Some(4));
        gate.set_subscribed(true);

        assert!(gate.tear_down(4));
        assert!(!gate.is_subscribed());
        assert!(gate.teardown_pending());
        assert_eq!(gate.take_teardown(), Some(4));
        assert_eq!(gate.take_teardown(), None);
    }

    #[test]
    fn test_tear_down_other_connection_ignored() {
        let gate = DeliveryGate::new();
        gate.track(Some(4));
        gate.set_subscribed(true);

        assert!(!gate.tear_down(9));
        assert!(gate.is_subscribed());
        assert!(!gate.teardown_pending());
    }

    #[test]
    fn test_tear_down_before_tracking_is_latched() {
        let gate = DeliveryGate::new();
        assert!(gate.tear_down(0));
        assert_eq!(gate.take_teardown(), Some(0));
    }
}
