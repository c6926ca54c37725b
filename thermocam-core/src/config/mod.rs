//! Configuration types and parser
//!
//! The camera configuration is an embedded TOML file parsed at boot by a
//! small no_std parser.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ParseError};
pub use types::*;
