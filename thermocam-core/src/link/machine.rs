//! Link state machine definition
//!
//! ```text
//! Idle ──Connected──▶ Subscribing ──Subscribe──▶ Subscribed
//!  ▲                                                 │
//!  │                                   Unsubscribe / Disconnected
//!  │                                                 ▼
//!  └──────────Settle────────── Unsubscribed | Disconnected
//! ```

use super::events::LinkEvent;

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No active subscription
    #[default]
    Idle,
    /// Viewer connected, notifications not yet enabled
    Subscribing,
    /// Viewer wants frames
    Subscribed,
    /// Viewer turned notifications off
    Unsubscribed,
    /// Connection lost
    Disconnected,
}

impl LinkState {
    /// Check if frames may be produced in this state
    pub fn gate_open(&self) -> bool {
        matches!(self, LinkState::Subscribed)
    }

    /// Check if this is an exit state that settles back to `Idle`
    pub fn is_transient(&self) -> bool {
        matches!(self, LinkState::Unsubscribed | LinkState::Disconnected)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkState as S;

        match (self, event) {
            // A connection drop wins over everything except an already idle link
            (S::Idle, LinkEvent::Disconnected) => S::Idle,
            (_, LinkEvent::Disconnected) => S::Disconnected,

            (S::Idle, LinkEvent::Connected) => S::Subscribing,

            // Enabling notifications from any non-subscribed state; a viewer
            // that stayed connected after unsubscribing lands in Idle
            (S::Idle | S::Subscribing | S::Unsubscribed, LinkEvent::SubscriptionChanged(true)) => {
                S::Subscribed
            }
            (S::Subscribed, LinkEvent::SubscriptionChanged(false)) => S::Unsubscribed,

            (S::Unsubscribed | S::Disconnected, LinkEvent::Settle) => S::Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = LinkState::Idle;
        let state = state.transition(LinkEvent::Connected);
        assert_eq!(state, LinkState::Subscribing);
        let state = state.transition(LinkEvent::SubscriptionChanged(true));
        assert_eq!(state, LinkState::Subscribed);
        assert!(state.gate_open());
    }

    #[test]
    fn test_exits_from_subscribed() {
        let unsub = LinkState::Subscribed.transition(LinkEvent::SubscriptionChanged(false));
        assert_eq!(unsub, LinkState::Unsubscribed);
        assert_eq!(unsub.transition(LinkEvent::Settle), LinkState::Idle);

        let gone = LinkState::Subscribed.transition(LinkEvent::Disconnected);
        assert_eq!(gone, LinkState::Disconnected);
        assert_eq!(gone.transition(LinkEvent::Settle), LinkState::Idle);
    }

    #[test]
    fn test_only_subscribed_opens_gate() {
        let states = [
            LinkState::Idle,
            LinkState::Subscribing,
            LinkState::Unsubscribed,
            LinkState::Disconnected,
        ];
        for state in states {
            assert!(!state.gate_open());
        }
        assert!(LinkState::Subscribed.gate_open());
    }

    #[test]
    fn test_disconnect_from_any_active_state() {
        let states = [
            LinkState::Subscribing,
            LinkState::Subscribed,
            LinkState::Unsubscribed,
        ];
        for state in states {
            assert_eq!(
                state.transition(LinkEvent::Disconnected),
                LinkState::Disconnected
            );
        }
        assert_eq!(
            LinkState::Idle.transition(LinkEvent::Disconnected),
            LinkState::Idle
        );
    }

    #[test]
    fn test_resubscribe_without_reconnect() {
        let idle = LinkState::Subscribed
            .transition(LinkEvent::SubscriptionChanged(false))
            .transition(LinkEvent::Settle);
        assert_eq!(
            idle.transition(LinkEvent::SubscriptionChanged(true)),
            LinkState::Subscribed
        );
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(
            LinkState::Subscribing.transition(LinkEvent::SubscriptionChanged(false)),
            LinkState::Subscribing
        );
        assert_eq!(
            LinkState::Subscribed.transition(LinkEvent::Connected),
            LinkState::Subscribed
        );
        assert_eq!(
            LinkState::Subscribed.transition(LinkEvent::Settle),
            LinkState::Subscribed
        );
        assert_eq!(LinkState::Idle.transition(LinkEvent::Settle), LinkState::Idle);
    }

    #[test]
    fn test_transient_states() {
        assert!(LinkState::Unsubscribed.is_transient());
        assert!(LinkState::Disconnected.is_transient());
        assert!(!LinkState::Subscribed.is_transient());
        assert!(!LinkState::Idle.is_transient());
    }
}
