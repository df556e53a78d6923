//! Serial port byte source
//!
//! The PX4Flow enumerates as a USB CDC device and streams MAVLink at the
//! configured baud rate. The port's read timeout bounds how long one
//! refresh waits for bytes.

use std::io::{ErrorKind, Read};
use std::time::Duration;

use pxflow_hal::ByteSource;
use serialport::SerialPort;

use crate::config::PortConfig;
use crate::error::HostError;

/// Byte source over an open serial port
pub struct SerialSource {
    path: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialSource {
    /// Open the port described by `config`
    pub fn open(config: &PortConfig) -> Result<Self, HostError> {
        let port = serialport::new(&config.path, config.baudrate)
            .timeout(Duration::from_millis(config.timeout_ms))
            .open()
            .map_err(|source| HostError::Serial {
                path: config.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %config.path,
            baudrate = config.baudrate,
            "opened sensor port"
        );

        Ok(Self {
            path: config.path.clone(),
            port: Some(port),
        })
    }

    /// Wrap a port opened elsewhere
    pub fn from_port(path: impl Into<String>, port: Box<dyn SerialPort>) -> Self {
        Self {
            path: path.into(),
            port: Some(port),
        }
    }

    /// Device path the port was opened with
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check if the port has not been closed yet
    pub fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

impl ByteSource for SerialSource {
    type Error = HostError;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, HostError> {
        let port = self.port.as_mut().ok_or(HostError::Closed)?;
        match port.read(buf) {
            Ok(n) => Ok(n),
            // Nothing arrived within the port timeout
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => Ok(0),
            Err(e) => Err(HostError::Io(e)),
        }
    }

    fn close(&mut self) -> Result<(), HostError> {
        if self.port.take().is_some() {
            tracing::info!(path = %self.path, "closed sensor port");
        }
        Ok(())
    }
}
