//! Link task
//!
//! Feeds transport events through the link supervisor, which keeps the
//! delivery gate in step with the subscription state. Disconnects latched
//! by the transport are applied before each event.

use defmt::*;
use thermocam_core::link::Transition;
use thermocam_core::LinkSupervisor;

use crate::channels::{GATE, TRANSPORT_EVENTS};

fn log_transition(transition: &Transition) {
    match transition.via {
        Some(via) => info!(
            "Link {:?} -> {:?} -> {:?}",
            transition.from, via, transition.to
        ),
        None => info!("Link {:?} -> {:?}", transition.from, transition.to),
    }
}

/// Link task - owns the link state machine
#[embassy_executor::task]
pub async fn link_task() {
    info!("Link task started");

    let mut supervisor = LinkSupervisor::new(&GATE);

    loop {
        let event = TRANSPORT_EVENTS.receive().await;

        if let Some(teardown) = supervisor.reconcile() {
            info!("Connection torn down");
            log_transition(&teardown);
        }

        let transition = supervisor.handle(event);
        if !transition.changed() {
            debug!("Ignored {:?}", event);
            continue;
        }
        log_transition(&transition);

        if GATE.is_subscribed() {
            info!("Viewer subscribed, acquisition running");
        }
    }
}
