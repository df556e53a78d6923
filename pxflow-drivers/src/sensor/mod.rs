//! Sensor drivers

pub mod px4flow;
