//! Events that trigger link state transitions

/// Events that can trigger link state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A viewer connected
    Connected,
    /// The viewer enabled (`true`) or disabled (`false`) notifications
    SubscriptionChanged(bool),
    /// The connection went away
    Disconnected,
    /// Leave a transient exit state
    Settle,
}

impl LinkEvent {
    /// Check if this event comes straight from the transport
    pub fn is_transport_event(&self) -> bool {
        !matches!(self, LinkEvent::Settle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_events() {
        assert!(LinkEvent::Connected.is_transport_event());
        assert!(LinkEvent::SubscriptionChanged(true).is_transport_event());
        assert!(LinkEvent::Disconnected.is_transport_event());
        assert!(!LinkEvent::Settle.is_transport_event());
    }
}
