//! Outbound application events.
//!
//! The [`Controller`](super::controller::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them: log to the console or count them in a test.

use crate::error::{ChecksumError, SyncError};

/// Structured events emitted by the controller loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The start-streaming command was sent.
    Started,

    /// No start marker was found; the next iteration resynchronizes.
    SyncLost(SyncError),

    /// A packet was dropped for a bad checksum.
    ChecksumMismatch(ChecksumError),

    /// Occupancy or motion changed on the latest averaged frame.
    ClassificationChanged { occupancy: bool, motion: bool },

    /// The trigger collaborator was fired at this packet count.
    Triggered(u64),

    /// Periodic throughput report (verbose mode only).
    Throughput(Throughput),

    /// The loop finished and the stop command was attempted.
    Stopped(RunSummary),
}

/// Packet rate snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub packets: u64,
    pub packets_per_sec: f32,
    /// Raw thermistor value of the latest packet.
    pub thermistor: i16,
}

/// Counters accumulated over one controller run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Validated packets.
    pub packets: u64,
    /// Averaged frames delivered to the frame sink.
    pub frames: u64,
    pub sync_errors: u64,
    pub checksum_errors: u64,
}
