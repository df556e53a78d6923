//! pxflow Hardware Abstraction Layer
//!
//! This crate defines the two things the sensor driver needs from the
//! outside world: a source of raw serial bytes and a monotonic clock.
//! Platform crates implement them (host serial ports, embedded UARTs).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pxflow-drivers (Px4Flow driver)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pxflow-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ pxflow-hal-   │       │  embedded-io  │
//! │     host      │       │    readers    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::ByteSource`] - Non-blocking "read what is available" byte input
//! - [`clock::Clock`] - Monotonic microsecond time base

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use uart::{ByteSource, EmbeddedIoSource};
