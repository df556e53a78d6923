//! Sensor driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! pxflow-core:
//!
//! - PX4Flow optical flow sensor over MAVLink

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;

pub use pxflow_core::FlowSensor;
pub use sensor::px4flow::{Px4Flow, TransportError};
