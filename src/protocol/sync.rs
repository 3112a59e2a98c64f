//! Start-of-frame resynchronization.
//!
//! Scans an unsynchronized byte stream for the `***` marker.  The scan is
//! bounded to one packet width so a dead or silent link cannot hang it, and
//! so a single corrupted packet is always skipped within one pass.

use super::transport::{Transport, read_byte};
use super::{MARKER, MARKER_LEN, PACKET_WIDTH};
use crate::error::{ReadError, SyncError};

/// Locates the start-of-frame marker in a byte stream.
#[derive(Debug, Clone, Copy)]
pub struct StreamSynchronizer {
    window: usize,
}

impl StreamSynchronizer {
    /// Synchronizer with the standard one-packet scan window.
    pub const fn new() -> Self {
        Self { window: PACKET_WIDTH }
    }

    /// Consume bytes until three consecutive marker bytes have been read.
    ///
    /// On success the stream is positioned on the first thermistor byte.
    /// Fails with [`SyncError`] if no marker byte shows up within the window,
    /// or if the first marker byte is not followed by two more.  A source
    /// that runs dry first, even part way into the marker, is
    /// [`ReadError::Closed`].
    pub fn sync<T: Transport>(&self, link: &mut T) -> Result<(), ReadError<T::Error>> {
        let mut scanned = 0;
        loop {
            if scanned == self.window {
                return Err(SyncError { scanned }.into());
            }
            let byte = read_byte(link)?;
            scanned += 1;
            if byte == MARKER {
                break;
            }
        }

        for _ in 1..MARKER_LEN {
            let byte = read_byte(link)?;
            scanned += 1;
            if byte != MARKER {
                return Err(SyncError { scanned }.into());
            }
        }
        Ok(())
    }
}

impl Default for StreamSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}
