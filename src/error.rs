//! Error types for the GridEye stream reader.
//!
//! Two stream conditions are expected in normal operation and are
//! recoverable at the loop level: a lost start marker ([`SyncError`]) and a
//! corrupted packet ([`ChecksumError`]).  Everything else coming out of the
//! byte source is fatal and is carried through [`ReadError`] untouched.

use core::fmt;

// ---------------------------------------------------------------------------
// Recoverable stream errors
// ---------------------------------------------------------------------------

/// No valid `***` start marker was found within one packet width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncError {
    /// Bytes consumed from the stream before giving up.
    pub scanned: usize,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sync failed after {} bytes", self.scanned)
    }
}

/// A full-length packet arrived but its checksum byte did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumError {
    /// Checksum byte carried on the wire.
    pub received: u8,
    /// Checksum computed over thermistor + array bytes.
    pub computed: u8,
}

impl fmt::Display for ChecksumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bad checksum: received {:#04x}, computed {:#04x}",
            self.received, self.computed
        )
    }
}

// ---------------------------------------------------------------------------
// Packet read errors
// ---------------------------------------------------------------------------

/// Every way a single packet read can fail.
///
/// `E` is the transport's own error type; it is never inspected here.
#[derive(Debug)]
pub enum ReadError<E> {
    /// Start marker not found (recoverable).
    Sync(SyncError),
    /// Checksum mismatch (recoverable).
    Checksum(ChecksumError),
    /// The byte source reported end of stream.
    Closed,
    /// The byte source failed (disconnect, timeout, ...).
    Link(E),
}

impl<E> ReadError<E> {
    /// True for the conditions the controller loop absorbs and moves past.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Sync(_) | Self::Checksum(_))
    }
}

impl<E: fmt::Display> fmt::Display for ReadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(e) => write!(f, "{e}"),
            Self::Checksum(e) => write!(f, "{e}"),
            Self::Closed => write!(f, "byte source closed"),
            Self::Link(e) => write!(f, "link: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ReadError<E> {}

impl<E> From<SyncError> for ReadError<E> {
    fn from(e: SyncError) -> Self {
        Self::Sync(e)
    }
}

impl<E> From<ChecksumError> for ReadError<E> {
    fn from(e: ChecksumError) -> Self {
        Self::Checksum(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`SystemConfig`](crate::config::SystemConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The serialized config could not be parsed.
    Corrupted(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted(msg) => write!(f, "config corrupted: {msg}"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
