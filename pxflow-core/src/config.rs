//! Driver configuration
//!
//! The frame schema (message id, sentinel, field layout) is fixed by the
//! sensor firmware and is not configurable. Only how the driver reads and
//! integrates is.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::DEFAULT_GAP_THRESHOLD_S;

/// Largest read the driver will issue in one refresh
pub const MAX_READ_CHUNK: usize = 2048;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Read chunk is zero or above [`MAX_READ_CHUNK`]
    InvalidReadChunk,
    /// Gap threshold is not a positive finite number
    InvalidGapThreshold,
}

/// Sensor driver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Maximum bytes pulled from the transport per refresh
    pub read_chunk: usize,
    /// Sample intervals at or above this (seconds) are not integrated
    pub gap_threshold_s: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            read_chunk: MAX_READ_CHUNK,
            gap_threshold_s: DEFAULT_GAP_THRESHOLD_S,
        }
    }
}

impl DriverConfig {
    /// Check that every field is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_chunk == 0 || self.read_chunk > MAX_READ_CHUNK {
            return Err(ConfigError::InvalidReadChunk);
        }
        if !(self.gap_threshold_s.is_finite() && self.gap_threshold_s > 0.0) {
            return Err(ConfigError::InvalidGapThreshold);
        }
        Ok(())
    }
}
