//! Link supervisor
//!
//! Turns raw transport events into link state transitions and keeps the
//! delivery gate in step with the state. Only one viewer is tracked; events
//! for any other connection are ignored.

use thermocam_protocol::events::{AttrHandle, ConnHandle};
use thermocam_protocol::TransportEvent;

use super::events::LinkEvent;
use super::machine::LinkState;
use crate::gate::DeliveryGate;

/// Result of handling one transport event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State before the event
    pub from: LinkState,
    /// Transient exit state passed through, if any
    pub via: Option<LinkState>,
    /// State after the event (settled)
    pub to: LinkState,
}

impl Transition {
    /// Check if the event changed anything
    pub fn changed(&self) -> bool {
        self.from != self.to || self.via.is_some()
    }
}

/// Owner of the link state
///
/// Opens and closes the delivery gate to match the state. The transport may
/// close it early through [`DeliveryGate::tear_down`]; the supervisor picks
/// that up in [`LinkSupervisor::reconcile`].
pub struct LinkSupervisor<'g> {
    state: LinkState,
    gate: &'g DeliveryGate,
    conn: Option<ConnHandle>,
    /// Torn-down connection whose queued events are stale
    closed: Option<ConnHandle>,
    image_attr: Option<AttrHandle>,
}

impl<'g> LinkSupervisor<'g> {
    /// Create a supervisor accepting subscriptions on any characteristic
    pub fn new(gate: &'g DeliveryGate) -> Self {
        gate.set_subscribed(false);
        gate.track(None);
        Self {
            state: LinkState::Idle,
            gate,
            conn: None,
            closed: None,
            image_attr: None,
        }
    }

    /// Only react to subscriptions on the image characteristic value handle
    pub fn with_image_attr(mut self, attr: AttrHandle) -> Self {
        self.image_attr = Some(attr);
        self
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Connection currently tracked
    pub fn connection(&self) -> Option<ConnHandle> {
        self.conn
    }

    /// Apply a teardown latched by the transport, if any
    ///
    /// Returns the transition when the torn-down connection was the tracked
    /// one. Called implicitly at the start of [`LinkSupervisor::handle`].
    pub fn reconcile(&mut self) -> Option<Transition> {
        let conn = self.gate.take_teardown()?;
        self.closed = Some(conn);

        if self.conn == Some(conn) {
            self.set_conn(None);
            Some(self.step(LinkEvent::Disconnected))
        } else {
            // Not ours; undo the early close
            self.gate.set_subscribed(self.state.gate_open());
            None
        }
    }

    /// Handle one transport event
    pub fn handle(&mut self, event: TransportEvent) -> Transition {
        self.reconcile();

        match self.classify(event) {
            Some(link_event) => self.step(link_event),
            None => Transition {
                from: self.state,
                via: None,
                to: self.state,
            },
        }
    }

    fn step(&mut self, link_event: LinkEvent) -> Transition {
        let from = self.state;
        let next = self.state.transition(link_event);
        self.apply(next);

        if next.is_transient() {
            let settled = next.transition(LinkEvent::Settle);
            self.apply(settled);
            Transition {
                from,
                via: Some(next),
                to: settled,
            }
        } else {
            Transition {
                from,
                via: None,
                to: next,
            }
        }
    }

    /// Map a transport event onto a link event for the tracked connection
    fn classify(&mut self, event: TransportEvent) -> Option<LinkEvent> {
        if self.closed == Some(event.conn()) {
            // The queued disconnect for a torn-down connection ends its backlog
            if matches!(event, TransportEvent::Disconnected { .. }) {
                self.closed = None;
            }
            return None;
        }

        match event {
            TransportEvent::Connected { conn } => match self.conn {
                None => {
                    self.closed = None;
                    self.set_conn(Some(conn));
                    Some(LinkEvent::Connected)
                }
                Some(_) => None,
            },
            TransportEvent::SubscriptionChanged { conn, attr, notify } => {
                if self.image_attr.is_some_and(|image| image != attr) {
                    return None;
                }
                match self.conn {
                    Some(tracked) if tracked != conn => None,
                    _ => {
                        self.set_conn(Some(conn));
                        Some(LinkEvent::SubscriptionChanged(notify))
                    }
                }
            }
            TransportEvent::Disconnected { conn, .. } => {
                if self.conn == Some(conn) {
                    self.set_conn(None);
                    Some(LinkEvent::Disconnected)
                } else {
                    None
                }
            }
        }
    }

    fn set_conn(&mut self, conn: Option<ConnHandle>) {
        self.conn = conn;
        self.gate.track(conn);
    }

    fn apply(&mut self, next: LinkState) {
        self.gate.set_subscribed(next.gate_open());
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_ATTR: AttrHandle = 0x000E;

    fn subscribe(conn: ConnHandle, notify: bool) -> TransportEvent {
        TransportEvent::SubscriptionChanged {
            conn,
            attr: IMAGE_ATTR,
            notify,
        }
    }

    #[test]
    fn test_subscribe_opens_gate() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate).with_image_attr(IMAGE_ATTR);

        link.handle(TransportEvent::Connected { conn: 1 });
        assert_eq!(link.state(), LinkState::Subscribing);
        assert!(!gate.is_subscribed());

        let t = link.handle(subscribe(1, true));
        assert_eq!(t.to, LinkState::Subscribed);
        assert!(gate.is_subscribed());
    }

    #[test]
    fn test_disconnect_closes_gate_and_settles() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate);
        link.handle(TransportEvent::Connected { conn: 1 });
        link.handle(subscribe(1, true));

        let t = link.handle(TransportEvent::Disconnected {
            conn: 1,
            reason: 0x13,
        });
        assert_eq!(t.from, LinkState::Subscribed);
        assert_eq!(t.via, Some(LinkState::Disconnected));
        assert_eq!(t.to, LinkState::Idle);
        assert!(!gate.is_subscribed());
        assert_eq!(link.connection(), None);
    }

    #[test]
    fn test_unsubscribe_closes_gate() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate);
        link.handle(TransportEvent::Connected { conn: 2 });
        link.handle(subscribe(2, true));

        let t = link.handle(subscribe(2, false));
        assert_eq!(t.via, Some(LinkState::Unsubscribed));
        assert_eq!(t.to, LinkState::Idle);
        assert!(!gate.is_subscribed());
        // Still connected
        assert_eq!(link.connection(), Some(2));

        link.handle(subscribe(2, true));
        assert!(gate.is_subscribed());
    }

    #[test]
    fn test_other_characteristic_ignored() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate).with_image_attr(IMAGE_ATTR);
        link.handle(TransportEvent::Connected { conn: 1 });

        let t = link.handle(TransportEvent::SubscriptionChanged {
            conn: 1,
            attr: IMAGE_ATTR + 2,
            notify: true,
        });
        assert!(!t.changed());
        assert!(!gate.is_subscribed());
    }

    #[test]
    fn test_second_viewer_ignored() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate);
        link.handle(TransportEvent::Connected { conn: 1 });
        link.handle(subscribe(1, true));

        // A second central neither steals nor closes the link
        link.handle(TransportEvent::Connected { conn: 7 });
        link.handle(subscribe(7, false));
        link.handle(TransportEvent::Disconnected { conn: 7, reason: 0 });

        assert_eq!(link.state(), LinkState::Subscribed);
        assert!(gate.is_subscribed());
    }

    #[test]
    fn test_new_closes_stale_gate() {
        let gate = DeliveryGate::new();
        gate.set_subscribed(true);
        let link = LinkSupervisor::new(&gate);
        assert_eq!(link.state(), LinkState::Idle);
        assert!(!gate.is_subscribed());
    }

    /// Fixed-size event queue that drops on overflow, like the firmware channel
    struct EventQueue {
        slots: [Option<TransportEvent>; 8],
        len: usize,
    }

    impl EventQueue {
        fn new() -> Self {
            Self {
                slots: [None; 8],
                len: 0,
            }
        }

        fn try_send(&mut self, event: TransportEvent) -> bool {
            if self.len == self.slots.len() {
                return false;
            }
            self.slots[self.len] = Some(event);
            self.len += 1;
            true
        }

        fn drain_into(&mut self, link: &mut LinkSupervisor<'_>, gate: &DeliveryGate) {
            for slot in &mut self.slots[..self.len] {
                if let Some(event) = slot.take() {
                    link.handle(event);
                    assert!(!gate.is_subscribed(), "gate reopened by {:?}", event);
                }
            }
            self.len = 0;
        }
    }

    #[test]
    fn test_dropped_disconnect_still_closes_gate() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate).with_image_attr(IMAGE_ATTR);
        link.handle(TransportEvent::Connected { conn: 1 });
        link.handle(subscribe(1, true));
        assert!(gate.is_subscribed());

        // A viewer flapping its CCCD fills the queue before it disconnects
        let mut queue = EventQueue::new();
        for i in 0..8 {
            assert!(queue.try_send(subscribe(1, i % 2 == 1)));
        }

        assert!(gate.tear_down(1));
        assert!(!gate.is_subscribed());
        assert!(!queue.try_send(TransportEvent::Disconnected {
            conn: 1,
            reason: 0x13
        }));

        queue.drain_into(&mut link, &gate);
        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(link.connection(), None);

        // The next viewer is accepted
        link.handle(TransportEvent::Connected { conn: 2 });
        let t = link.handle(subscribe(2, true));
        assert_eq!(t.to, LinkState::Subscribed);
        assert_eq!(link.connection(), Some(2));
        assert!(gate.is_subscribed());
    }

    #[test]
    fn test_reconcile_reports_teardown() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate);
        link.handle(TransportEvent::Connected { conn: 3 });
        link.handle(subscribe(3, true));

        assert!(gate.tear_down(3));
        let t = link.reconcile().unwrap();
        assert_eq!(t.from, LinkState::Subscribed);
        assert_eq!(t.via, Some(LinkState::Disconnected));
        assert_eq!(t.to, LinkState::Idle);
        assert!(link.reconcile().is_none());

        // The queued disconnect arriving afterwards changes nothing
        let t = link.handle(TransportEvent::Disconnected { conn: 3, reason: 0 });
        assert!(!t.changed());
        assert!(!gate.is_subscribed());
    }

    #[test]
    fn test_teardown_before_connect_processed() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate);

        // Connection came and went before the link task saw it
        assert!(gate.tear_down(5));
        link.handle(TransportEvent::Connected { conn: 5 });
        link.handle(subscribe(5, true));

        assert_eq!(link.state(), LinkState::Idle);
        assert_eq!(link.connection(), None);
        assert!(!gate.is_subscribed());
    }

    #[test]
    fn test_teardown_of_other_connection_keeps_link() {
        let gate = DeliveryGate::new();
        let mut link = LinkSupervisor::new(&gate);
        link.handle(TransportEvent::Connected { conn: 1 });
        link.handle(subscribe(1, true));

        assert!(!gate.tear_down(8));
        assert!(link.reconcile().is_none());
        assert_eq!(link.state(), LinkState::Subscribed);
        assert!(gate.is_subscribed());
    }

}
