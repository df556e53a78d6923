//! Board-agnostic core logic for the PX4Flow reader
//!
//! This crate contains everything that sits between a decoded frame and the
//! consumer of a reading, independent of how bytes arrive:
//!
//! - The decoded OPTICAL_FLOW reading
//! - Velocity integration into an accumulated position
//! - Sample counting for throughput reporting
//! - Driver configuration types
//! - The `FlowSensor` accessor trait

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod position;
pub mod reading;
pub mod stats;
pub mod traits;

pub use config::{ConfigError, DriverConfig};
pub use position::{AccumulatedPosition, IntegrationStep};
pub use reading::DecodedReading;
pub use stats::SampleCounter;
pub use traits::{AccessError, FlowSensor};
