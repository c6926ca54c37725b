//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermocam-core:
//!
//! - Thermal sensors (Panasonic Grid-EYE AMG88xx over I2C)
//! - Fault indicators (GPIO LED)

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;
pub mod sensor;
