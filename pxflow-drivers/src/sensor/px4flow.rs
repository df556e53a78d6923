//! PX4Flow optical flow sensor
//!
//! The PX4Flow streams MAVLink OPTICAL_FLOW messages continuously. Each
//! `refresh()` drains whatever bytes have arrived, decodes every complete
//! OPTICAL_FLOW frame among them, and folds the compensated flow into a
//! dead-reckoned x/y position.

use pxflow_core::config::MAX_READ_CHUNK;
use pxflow_core::{
    AccessError, AccumulatedPosition, ConfigError, DecodedReading, DriverConfig, FlowSensor,
    IntegrationStep, SampleCounter,
};
use pxflow_hal::{ByteSource, Clock};
use pxflow_protocol::{DecodeError, FrameParser, ParserStats, MSG_OPTICAL_FLOW};

/// Errors from the sensor link
///
/// All of these are fatal to the refresh loop; the driver never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// Reading from the link failed
    Read(E),
    /// Closing the link failed
    Close(E),
    /// The link was already closed
    Closed,
}

/// PX4Flow driver
///
/// Owns the transport for its whole lifetime. The transport is closed by
/// [`Px4Flow::close`] or, failing that, when the driver is dropped.
pub struct Px4Flow<T: ByteSource, C: Clock> {
    transport: T,
    clock: C,
    config: DriverConfig,
    parser: FrameParser,
    /// Latest decoded reading, `None` until the first frame
    reading: Option<DecodedReading>,
    position: AccumulatedPosition,
    counter: SampleCounter,
    last_step: Option<IntegrationStep>,
    decode_failures: u32,
    last_decode_error: Option<DecodeError>,
    open: bool,
}

impl<T: ByteSource, C: Clock> Px4Flow<T, C> {
    /// Create a driver over an opened transport
    ///
    /// Sample counting starts at the current clock time.
    pub fn new(transport: T, clock: C, config: DriverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(transport, clock, config))
    }

    /// Create a driver with the default configuration
    pub fn with_defaults(transport: T, clock: C) -> Self {
        Self::build(transport, clock, DriverConfig::default())
    }

    fn build(transport: T, clock: C, config: DriverConfig) -> Self {
        let start_us = clock.now_us();

        Self {
            transport,
            clock,
            config,
            parser: FrameParser::new(MSG_OPTICAL_FLOW),
            reading: None,
            position: AccumulatedPosition::new(),
            counter: SampleCounter::new(start_us),
            last_step: None,
            decode_failures: 0,
            last_decode_error: None,
            open: true,
        }
    }

    /// Pull available bytes from the transport and decode them
    ///
    /// A read that returns no bytes is not an error. Decode failures are
    /// recorded (see [`Px4Flow::decode_failures`]) and leave the previous
    /// reading in place.
    pub fn refresh(&mut self) -> Result<(), TransportError<T::Error>> {
        if !self.open {
            return Err(TransportError::Closed);
        }

        let mut buf = [0u8; MAX_READ_CHUNK];
        let limit = self.config.read_chunk.min(MAX_READ_CHUNK);
        let n = self
            .transport
            .read_available(&mut buf[..limit])
            .map_err(TransportError::Read)?;

        for &byte in &buf[..n.min(limit)] {
            if let Some(frame) = self.parser.feed(byte) {
                self.accept(&frame.payload);
            }
        }

        Ok(())
    }

    /// Decode one accepted OPTICAL_FLOW payload and update state
    fn accept(&mut self, payload: &[u8]) {
        let reading = match DecodedReading::decode(payload) {
            Ok(reading) => reading,
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("OPTICAL_FLOW decode failed: {:?}", e);
                self.decode_failures = self.decode_failures.wrapping_add(1);
                self.last_decode_error = Some(e);
                return;
            }
        };

        let step = self.position.integrate(
            reading.timestamp_sec(),
            reading.flow_comp_x,
            reading.flow_comp_y,
            self.config.gap_threshold_s,
        );

        #[cfg(feature = "defmt")]
        match step {
            IntegrationStep::Gap { dt_s } => defmt::debug!("Sample gap of {} s, not integrated", dt_s),
            _ => defmt::trace!("OPTICAL_FLOW t={}us q={}", reading.time_us, reading.quality),
        }

        self.reading = Some(reading);
        self.last_step = Some(step);
        self.counter.record();
    }

    /// Close the transport
    ///
    /// Safe to call more than once; only the first call reaches the
    /// transport.
    pub fn close(&mut self) -> Result<(), TransportError<T::Error>> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        self.transport.close().map_err(TransportError::Close)
    }

    /// Check if the transport is still open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Check if at least one frame has been decoded
    pub fn has_reading(&self) -> bool {
        self.reading.is_some()
    }

    /// Accumulated position since construction
    pub fn position(&self) -> &AccumulatedPosition {
        &self.position
    }

    /// Accumulated x displacement in meters
    pub fn x_accum(&self) -> f64 {
        self.position.x()
    }

    /// Accumulated y displacement in meters
    pub fn y_accum(&self) -> f64 {
        self.position.y()
    }

    /// Outcome of the most recent integration step
    pub fn last_integration_step(&self) -> Option<IntegrationStep> {
        self.last_step
    }

    /// Decoded sample counter
    ///
    /// Pair with [`Px4Flow::now_us`] to compute throughput.
    pub fn counter(&self) -> &SampleCounter {
        &self.counter
    }

    /// Number of decoded samples since construction
    pub fn sample_count(&self) -> u64 {
        self.counter.count()
    }

    /// Current time from the driver's clock
    pub fn now_us(&self) -> u64 {
        self.clock.now_us()
    }

    /// Frame parser counters
    pub fn parser_stats(&self) -> ParserStats {
        self.parser.stats()
    }

    /// Accepted frames whose payload could not be decoded
    pub fn decode_failures(&self) -> u32 {
        self.decode_failures
    }

    /// Error from the most recent failed decode
    pub fn last_decode_error(&self) -> Option<DecodeError> {
        self.last_decode_error
    }

    /// Active configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: ByteSource, C: Clock> FlowSensor for Px4Flow<T, C> {
    type Error = TransportError<T::Error>;

    fn refresh(&mut self) -> Result<(), Self::Error> {
        Px4Flow::refresh(self)
    }

    fn reading(&self) -> Result<&DecodedReading, AccessError> {
        self.reading.as_ref().ok_or(AccessError::NoReading)
    }
}

impl<T: ByteSource, C: Clock> Drop for Px4Flow<T, C> {
    fn drop(&mut self) {
        if self.open {
            self.open = false;
            let _ = self.transport.close();
        }
    }
}
