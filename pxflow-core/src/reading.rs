//! Decoded OPTICAL_FLOW reading

use pxflow_protocol::fields::{read_f32, read_f32_pair, read_i16_pair, read_u64, read_u8};
use pxflow_protocol::messages::optical_flow::{
    FLOW, FLOW_COMP_M, GROUND_DISTANCE, PAYLOAD_LEN, QUALITY, SENSOR_ID, TIME_US,
};
use pxflow_protocol::DecodeError;

/// One sensor sample, decoded from a single accepted frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedReading {
    /// Sensor timestamp in microseconds
    pub time_us: u64,
    /// Ground-compensated flow along x in m/s
    pub flow_comp_x: f32,
    /// Ground-compensated flow along y in m/s
    pub flow_comp_y: f32,
    /// Distance to ground in meters
    pub ground_distance: f32,
    /// Raw flow along x (pixels x10)
    pub raw_flow_x: i16,
    /// Raw flow along y (pixels x10)
    pub raw_flow_y: i16,
    /// Camera id
    pub sensor_id: u8,
    /// Flow quality, 0-255
    pub quality: u8,
}

impl DecodedReading {
    /// Decode every field from an OPTICAL_FLOW payload
    ///
    /// Fails if the payload is too short for any field. Extra trailing
    /// bytes are ignored.
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let time_us = read_u64(payload, TIME_US.lo, TIME_US.hi)?;
        let (flow_comp_x, flow_comp_y) = read_f32_pair(payload, FLOW_COMP_M.lo, FLOW_COMP_M.hi)?;
        let ground_distance = read_f32(payload, GROUND_DISTANCE.lo, GROUND_DISTANCE.hi)?;
        let (raw_flow_x, raw_flow_y) = read_i16_pair(payload, FLOW.lo, FLOW.hi)?;
        let sensor_id = read_u8(payload, SENSOR_ID.lo)?;
        let quality = read_u8(payload, QUALITY.lo)?;

        Ok(Self {
            time_us,
            flow_comp_x,
            flow_comp_y,
            ground_distance,
            raw_flow_x,
            raw_flow_y,
            sensor_id,
            quality,
        })
    }

    /// Encode into an OPTICAL_FLOW payload
    ///
    /// Used to build synthetic frames for replay and testing.
    pub fn encode(&self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[TIME_US.lo..TIME_US.hi].copy_from_slice(&self.time_us.to_le_bytes());
        let (comp_x, comp_y) = payload[FLOW_COMP_M.lo..FLOW_COMP_M.hi].split_at_mut(4);
        comp_x.copy_from_slice(&self.flow_comp_x.to_le_bytes());
        comp_y.copy_from_slice(&self.flow_comp_y.to_le_bytes());
        payload[GROUND_DISTANCE.lo..GROUND_DISTANCE.hi]
            .copy_from_slice(&self.ground_distance.to_le_bytes());
        let (raw_x, raw_y) = payload[FLOW.lo..FLOW.hi].split_at_mut(2);
        raw_x.copy_from_slice(&self.raw_flow_x.to_le_bytes());
        raw_y.copy_from_slice(&self.raw_flow_y.to_le_bytes());
        payload[SENSOR_ID.lo] = self.sensor_id;
        payload[QUALITY.lo] = self.quality;
        payload
    }

    /// Sensor timestamp in seconds
    pub fn timestamp_sec(&self) -> f64 {
        self.time_us as f64 / 1e6
    }

    /// Raw flow (x, y)
    pub fn flow(&self) -> (i16, i16) {
        (self.raw_flow_x, self.raw_flow_y)
    }

    /// Ground-compensated flow (x, y) in m/s
    pub fn flow_comp(&self) -> (f32, f32) {
        (self.flow_comp_x, self.flow_comp_y)
    }
}
