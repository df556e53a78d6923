//! Sensor abstraction traits
//!
//! These traits define the interface between a sensor driver and whatever
//! consumes its readings (display, logger, estimator).

pub mod flow;

pub use flow::{AccessError, FlowSensor};
