//! Byte source over any `std::io::Read`
//!
//! Useful for replaying captured sensor streams from a file or reading
//! from a pipe or socket instead of a serial port.

use std::io::{ErrorKind, Read};

use pxflow_hal::ByteSource;

use crate::error::HostError;

/// Adapter from `std::io::Read` to [`ByteSource`]
///
/// Timeouts, would-block and interrupted reads are reported as zero bytes
/// available rather than as errors.
pub struct IoSource<R> {
    inner: Option<R>,
}

impl<R: Read> IoSource<R> {
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self { inner: Some(inner) }
    }

    /// Get the reader back, or `None` once closed
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    type Error = HostError;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, HostError> {
        let reader = self.inner.as_mut().ok_or(HostError::Closed)?;
        match reader.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(e) => Err(HostError::Io(e)),
        }
    }

    fn close(&mut self) -> Result<(), HostError> {
        self.inner = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    struct FlakyReader {
        kinds: Vec<ErrorKind>,
    }

    impl Read for FlakyReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            match self.kinds.pop() {
                Some(kind) => Err(io::Error::from(kind)),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_reads_cursor() {
        let mut source = IoSource::new(Cursor::new(vec![1u8, 2, 3, 4]));
        let mut buf = [0u8; 3];

        assert_eq!(source.read_available(&mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(source.read_available(&mut buf).unwrap(), 1);
        assert_eq!(source.read_available(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_transient_errors_are_empty_reads() {
        let mut source = IoSource::new(FlakyReader {
            kinds: vec![
                ErrorKind::Interrupted,
                ErrorKind::WouldBlock,
                ErrorKind::TimedOut,
            ],
        });
        let mut buf = [0u8; 8];
        for _ in 0..3 {
            assert_eq!(source.read_available(&mut buf).unwrap(), 0);
        }
    }

    #[test]
    fn test_hard_error_propagates() {
        let mut source = IoSource::new(FlakyReader {
            kinds: vec![ErrorKind::BrokenPipe],
        });
        let mut buf = [0u8; 8];
        assert!(matches!(
            source.read_available(&mut buf),
            Err(HostError::Io(e)) if e.kind() == ErrorKind::BrokenPipe
        ));
    }

    #[test]
    fn test_closed_source() {
        let mut source = IoSource::new(Cursor::new(vec![1u8]));
        source.close().unwrap();

        let mut buf = [0u8; 1];
        assert!(matches!(
            source.read_available(&mut buf),
            Err(HostError::Closed)
        ));
        assert!(source.into_inner().is_none());
    }
}
