//! Log-based sink adapters.
//!
//! [`LogEventSink`] writes structured controller events to the `log`
//! facade.  [`LogFrameSink`] is the headless frame collaborator: it prints
//! each averaged grid instead of rendering it.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, FrameReport, FrameSink, TriggerSink};

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => info!("START | streaming requested"),
            AppEvent::SyncLost(e) => warn!("SYNC  | {}", e),
            AppEvent::ChecksumMismatch(e) => {
                warn!("CHKSUM| received={} computed={}", e.received, e.computed);
            }
            AppEvent::ClassificationChanged { occupancy, motion } => {
                info!("CLASS | occupancy={} motion={}", occupancy, motion);
            }
            AppEvent::Triggered(count) => info!("TRIG  | packet {}", count),
            AppEvent::Throughput(t) => {
                info!(
                    "RATE  | #{} {:.2} packets/sec | T={}",
                    t.packets, t.packets_per_sec, t.thermistor
                );
            }
            AppEvent::Stopped(s) => {
                info!(
                    "STOP  | packets={} frames={} sync_err={} chksum_err={}",
                    s.packets, s.frames, s.sync_errors, s.checksum_errors
                );
            }
        }
    }
}

/// Headless frame collaborator: one log line per grid row.
pub struct LogFrameSink {
    frames: u64,
}

impl LogFrameSink {
    pub fn new() -> Self {
        Self { frames: 0 }
    }

    /// Frames printed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for LogFrameSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for LogFrameSink {
    fn begin(&mut self, report: &FrameReport) {
        info!("FRAME | first frame at packet {}", report.packet_count);
        self.update(report);
    }

    fn update(&mut self, report: &FrameReport) {
        self.frames += 1;
        info!(
            "FRAME | #{} occupancy={} motion={} T={}",
            report.packet_count, report.occupancy, report.motion, report.thermistor
        );
        for row in report.frame.cells() {
            let line: Vec<String> = row.iter().map(|v| format!("{v:7.1}")).collect();
            info!("FRAME | {}", line.join(""));
        }
    }
}

impl TriggerSink for LogFrameSink {
    fn on_trigger(&mut self, packet_count: u64) {
        info!(
            "SNAP  | snapshot requested at packet {} ({} frames shown)",
            packet_count, self.frames
        );
    }
}
