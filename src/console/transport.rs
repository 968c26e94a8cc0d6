//! Transport abstraction — any byte-oriented channel.
//!
//! The console is generic over `Transport`; on the device it is backed by
//! the UART, in tests by an in-memory script.

use crate::error::{CommsError, Result};

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> core::result::Result<(), Self::Error>;

    /// Check if data is available for reading.
    fn available(&self) -> bool;
}

/// Read one byte if any is waiting.
pub fn read_byte<T: Transport>(io: &mut T) -> Result<Option<u8>> {
    if !io.available() {
        return Ok(None);
    }
    let mut buf = [0u8; 1];
    match io.read(&mut buf) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(buf[0])),
        Err(e) => {
            log::warn!("Serial read failed: {:?}", e);
            Err(CommsError::SerialReadFailed.into())
        }
    }
}

/// Write all of `data`, retrying short writes.
pub fn write_all<T: Transport>(io: &mut T, mut data: &[u8]) -> Result<()> {
    while !data.is_empty() {
        match io.write(data) {
            Ok(0) => {
                log::warn!("Serial write stalled with {} byte(s) pending", data.len());
                return Err(CommsError::SerialWriteFailed.into());
            }
            Ok(n) => data = &data[n.min(data.len())..],
            Err(e) => {
                log::warn!("Serial write failed: {:?}", e);
                return Err(CommsError::SerialWriteFailed.into());
            }
        }
    }
    Ok(())
}
