//! Host-side errors

use pxflow_core::ConfigError;
use thiserror::Error;

/// Errors from host transports and configuration loading
#[derive(Debug, Error)]
pub enum HostError {
    /// Opening or talking to the serial port failed
    #[error("serial port {path}: {source}")]
    Serial {
        path: String,
        #[source]
        source: serialport::Error,
    },

    /// Reading from the underlying stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport has already been closed
    #[error("transport is closed")]
    Closed,

    /// The config file is not valid TOML for [`crate::HostConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds unusable values
    #[error("invalid driver configuration: {0:?}")]
    Config(ConfigError),
}
