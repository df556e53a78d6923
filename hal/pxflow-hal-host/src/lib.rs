//! Host implementation of the pxflow HAL
//!
//! Provides std-backed implementations of the pxflow-hal traits:
//!
//! - [`serial::SerialSource`] - USB/UART serial port via `serialport`
//! - [`io::IoSource`] - any `std::io::Read` (files, pipes, sockets)
//! - [`clock::StdClock`] - monotonic clock over `std::time::Instant`
//!
//! plus TOML configuration loading for the port and driver.

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod error;
pub mod io;
pub mod serial;

pub use clock::StdClock;
pub use config::{load_config, parse_config, HostConfig, PortConfig};
pub use error::HostError;
pub use io::IoSource;
pub use serial::SerialSource;
