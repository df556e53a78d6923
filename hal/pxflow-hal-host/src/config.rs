//! TOML configuration for a host-attached sensor
//!
//! ```toml
//! [port]
//! path = "/dev/ttyACM0"
//! baudrate = 115200
//! timeout_ms = 10
//!
//! [driver]
//! read_chunk = 2048
//! gap_threshold_s = 0.1
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::Path;

use pxflow_core::DriverConfig;
use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Serial port settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    /// Device path, e.g. `/dev/ttyACM0` or `COM3`
    pub path: String,
    /// Line speed in bits per second
    pub baudrate: u32,
    /// Read timeout; a refresh blocks at most this long waiting for bytes
    pub timeout_ms: u64,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            path: String::from("/dev/ttyACM0"),
            baudrate: 115_200,
            timeout_ms: 10,
        }
    }
}

/// Top-level host configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// The `[port]` table
    pub port: PortConfig,
    /// The `[driver]` table
    pub driver: DriverConfig,
}

/// Parse and validate a configuration from TOML text
pub fn parse_config(text: &str) -> Result<HostConfig, HostError> {
    let config: HostConfig = toml::from_str(text)?;
    config.driver.validate().map_err(HostError::Config)?;
    Ok(config)
}

/// Read, parse and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<HostConfig, HostError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    tracing::debug!(
        file = %path.display(),
        port = %config.port.path,
        baudrate = config.port.baudrate,
        "loaded config"
    );
    Ok(config)
}
