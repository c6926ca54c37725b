//! Board-agnostic core logic for the Thermocam sensor
//!
//! This crate contains all device-side logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor, sink and fault-indicator traits
//! - Delivery gate (subscriber-present flag shared across tasks)
//! - Link lifecycle state machine and supervisor
//! - Acquisition controller (one trigger/read cycle per tick)
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod acquisition;
pub mod config;
pub mod gate;
pub mod link;
pub mod traits;

pub use acquisition::{AcquisitionController, CycleFault, CycleOutcome, CycleStats};
pub use gate::DeliveryGate;
pub use link::{LinkEvent, LinkState, LinkSupervisor};
