//! Message schemas understood by the reader
//!
//! Only OPTICAL_FLOW is decoded. Its field order follows the MAVLink
//! common message set, where fields are sorted by size (largest first)
//! before packing.

use crate::fields::{FieldSpec, FieldType};

/// MAVLink message id of OPTICAL_FLOW
pub const MSG_OPTICAL_FLOW: u8 = 100;

/// OPTICAL_FLOW payload layout
pub mod optical_flow {
    use super::*;

    /// Payload length the sensor sends for this message
    pub const PAYLOAD_LEN: usize = 26;

    /// Sensor timestamp in microseconds
    pub const TIME_US: FieldSpec = FieldSpec::new(FieldType::U64, 0, 8);
    /// Ground-compensated flow in m/s (x, y)
    pub const FLOW_COMP_M: FieldSpec = FieldSpec::new(FieldType::F32x2, 8, 16);
    /// Distance to ground in meters (sonar)
    pub const GROUND_DISTANCE: FieldSpec = FieldSpec::new(FieldType::F32, 16, 20);
    /// Raw flow in pixels x10 (x, y)
    pub const FLOW: FieldSpec = FieldSpec::new(FieldType::I16x2, 20, 24);
    /// Id of the camera that produced the frame
    pub const SENSOR_ID: FieldSpec = FieldSpec::new(FieldType::U8, 24, 25);
    /// Flow quality, 0 (bad) to 255 (best)
    pub const QUALITY: FieldSpec = FieldSpec::new(FieldType::U8, 25, 26);
}
