//! Thermocam wire protocol
//!
//! This crate defines what crosses the wireless link between the sensor
//! device and a viewer. There is exactly one message: the raw sensor frame,
//! pushed as a GATT notification (and served on GATT reads).
//!
//! # Frame Layout
//!
//! ```text
//! ┌──────────┬──────────┬─────┬───────────┐
//! │ PIXEL 0  │ PIXEL 1  │ ... │ PIXEL 63  │
//! │ 2B (LE)  │ 2B (LE)  │     │ 2B (LE)   │
//! └──────────┴──────────┴─────┴───────────┘
//!
//! pixel word:  15..11 unused │ 10 sign flag │ 10..0 magnitude (¼ °C)
//! ```
//!
//! The bytes are forwarded exactly as the sensor produced them; all
//! interpretation happens on the viewer.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod payload;
pub mod service;

pub use events::TransportEvent;
pub use payload::{
    pack_pixel, PayloadError, RawFrame, FRAME_LEN, GRID_SIDE, MAGNITUDE_MASK, PIXEL_COUNT,
    SIGN_FLAG,
};
pub use service::{ADVERTISED_NAME, IMAGE_CHARACTERISTIC_UUID, SERVICE_UUID};
