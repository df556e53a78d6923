//! Serial byte source abstractions
//!
//! The sensor streams MAVLink frames continuously, so the driver only ever
//! asks for "whatever bytes have arrived". There is no write side: the
//! reader never sends commands to the sensor.

/// Source of raw bytes from the sensor link
pub trait ByteSource {
    /// Error type for read and close operations
    type Error;

    /// Read the bytes currently available into `buf`
    ///
    /// Returns the number of bytes written to the front of `buf`. Zero is a
    /// valid result and means nothing has arrived yet. How long this blocks
    /// is up to the implementation (a host serial port applies its read
    /// timeout here).
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Release the underlying link
    ///
    /// Called at most once by the driver. The default does nothing, which
    /// suits sources that release themselves on drop.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_available(buf)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

/// Adapter for any [`embedded_io::Read`] implementation
///
/// Lets embassy buffered UARTs (and anything else speaking embedded-io)
/// feed the driver directly.
pub struct EmbeddedIoSource<R> {
    inner: R,
}

impl<R> EmbeddedIoSource<R> {
    /// Wrap an embedded-io reader
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Get the wrapped reader back
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: embedded_io::Read> ByteSource for EmbeddedIoSource<R> {
    type Error = R::Error;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.inner.read(buf)
    }
}
