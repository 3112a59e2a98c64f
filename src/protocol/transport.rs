//! Transport abstraction — any byte-oriented channel to the sensor.
//!
//! Concrete implementations:
//! - Serial port (USB-UART bridge, feature `serial`)
//! - In-memory replay buffer (captured streams, tests)
//!
//! The packet reader is generic over `Transport`, so adding a new
//! link requires zero changes to the protocol logic.

use core::fmt;

use log::warn;

use crate::error::ReadError;

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: fmt::Debug + fmt::Display;

    /// Read up to `buf.len()` bytes into `buf`, blocking until at least one
    /// byte is available.  Returns 0 only when the source is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Fill `buf` completely, in order.
pub fn read_exact<T: Transport>(link: &mut T, buf: &mut [u8]) -> Result<(), ReadError<T::Error>> {
    let mut filled = 0;
    while filled < buf.len() {
        match link.read(&mut buf[filled..]).map_err(ReadError::Link)? {
            0 => return Err(ReadError::Closed),
            n => filled += n,
        }
    }
    Ok(())
}

/// Read a single byte.
pub fn read_byte<T: Transport>(link: &mut T) -> Result<u8, ReadError<T::Error>> {
    let mut byte = [0u8; 1];
    read_exact(link, &mut byte)?;
    Ok(byte[0])
}

/// Write `data`, retrying short writes.
///
/// Returns the number of bytes the link accepted.  This is less than
/// `data.len()` only if a write accepted nothing.
pub fn write_all<T: Transport>(link: &mut T, data: &[u8]) -> Result<usize, T::Error> {
    let mut written = 0;
    while written < data.len() {
        match link.write(&data[written..])? {
            0 => {
                warn!("Link accepted {} of {} bytes", written, data.len());
                break;
            }
            n => written += n,
        }
    }
    Ok(written)
}
