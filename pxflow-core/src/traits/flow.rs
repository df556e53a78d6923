//! Optical flow sensor trait

use crate::reading::DecodedReading;

/// Errors from reading sensor fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessError {
    /// No frame has been decoded yet; call `refresh()` first
    NoReading,
}

/// Trait for optical flow sensors
///
/// Readings only change inside `refresh()`. Between refreshes every
/// accessor returns values from the same decoded frame, however old it is.
pub trait FlowSensor {
    /// Error type for refresh operations
    type Error;

    /// Pull new data from the sensor link
    fn refresh(&mut self) -> Result<(), Self::Error>;

    /// Most recent decoded reading
    fn reading(&self) -> Result<&DecodedReading, AccessError>;

    /// Distance to ground in meters
    fn ground_distance(&self) -> Result<f32, AccessError> {
        self.reading().map(|r| r.ground_distance)
    }

    /// Raw flow (x, y)
    fn flow(&self) -> Result<(i16, i16), AccessError> {
        self.reading().map(DecodedReading::flow)
    }

    /// Ground-compensated flow (x, y) in m/s
    fn flow_comp(&self) -> Result<(f32, f32), AccessError> {
        self.reading().map(DecodedReading::flow_comp)
    }

    /// Flow quality, 0-255
    fn quality(&self) -> Result<u8, AccessError> {
        self.reading().map(|r| r.quality)
    }

    /// Sensor timestamp in microseconds
    fn time_us(&self) -> Result<u64, AccessError> {
        self.reading().map(|r| r.time_us)
    }

    /// Camera id
    fn sensor_id(&self) -> Result<u8, AccessError> {
        self.reading().map(|r| r.sensor_id)
    }
}
