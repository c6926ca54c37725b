//! Link lifecycle state machine
//!
//! Tracks the viewer connection as an explicit, finite state machine driven
//! by discrete transport events. The delivery gate is a function of the
//! current state: open only while `Subscribed`.

pub mod events;
pub mod machine;
pub mod supervisor;

pub use events::LinkEvent;
pub use machine::LinkState;
pub use supervisor::{LinkSupervisor, Transition};
