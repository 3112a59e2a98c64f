//! Wire protocol for the GridEye serial stream.
//!
//! ```text
//! ┌────────────┬──────────────┬──────────────────┬──────────┐
//! │ Marker (3B)│ Thermistor   │ Array payload    │ Checksum │
//! │ '***'      │ 2B, i16 LE   │ 128B, 64 × i16 LE│ 1B       │
//! └────────────┴──────────────┴──────────────────┴──────────┘
//! ```
//!
//! The device streams packets back to back with no length prefix, so the
//! reader must find the marker in an otherwise unmarked byte stream
//! ([`sync`]) before it can read the fixed-layout fields ([`packet`]).

pub mod commands;
pub mod packet;
pub mod sync;
pub mod transport;

/// Start-of-frame marker byte (repeated three times).
pub const MARKER: u8 = b'*';

/// Number of marker bytes opening every packet.
pub const MARKER_LEN: usize = 3;

/// Thermistor field width.
pub const THERMISTOR_LEN: usize = 2;

/// Array payload width (64 × i16).
pub const PAYLOAD_LEN: usize = 128;

/// Full packet width, marker and checksum included.
pub const PACKET_WIDTH: usize = MARKER_LEN + THERMISTOR_LEN + PAYLOAD_LEN + 1;
