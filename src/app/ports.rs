//! Port traits — the boundary between the stream core and its collaborators.
//!
//! ```text
//!   Transport ──▶ Controller ──▶ FrameSink   (visualization)
//!                           ──▶ TriggerSink (snapshot export)
//!                           ──▶ EventSink   (logging / status)
//! ```
//!
//! The controller is single-threaded and calls these inline, between two
//! packet reads.  Implementations must return quickly: while a callback runs
//! nothing drains the serial receive buffer, and an overflow there shows up
//! as lost sync on the following packets.

use super::events::AppEvent;
use crate::frame::AveragedFrame;

/// Everything delivered for one completed averaging window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: AveragedFrame,
    pub occupancy: bool,
    pub motion: bool,
    /// Packet counter value when the window completed.
    pub packet_count: u64,
    /// Raw thermistor reading of the packet that completed the window.
    pub thermistor: i16,
}

/// Receives averaged frames and their classification.
pub trait FrameSink {
    /// First frame of the run.  Sinks that need one-off setup (creating a
    /// window, writing a header) override this.
    fn begin(&mut self, report: &FrameReport) {
        self.update(report);
    }

    /// Every subsequent frame.
    fn update(&mut self, report: &FrameReport);
}

/// Fired once when the packet counter reaches a configured trigger count.
pub trait TriggerSink {
    fn on_trigger(&mut self, packet_count: u64);
}

/// The controller emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
