//! Controller — the single-threaded packet loop.
//!
//! One [`step`](Controller::step) reads exactly one packet and fully
//! processes it before returning:
//!
//! ```text
//!  AwaitSync ──▶ Synced ──▶ PacketRead ─┬─ ok ──────▶ decode ─▶ average ─▶ classify ─▶ FrameSink
//!      ▲                                │                  └──────────────▶ trigger check ─▶ TriggerSink
//!      └──────── SyncError / ChecksumError (reported, next step resyncs)
//! ```
//!
//! The read is the only blocking point.  Stream faults are absorbed and
//! reported through the [`EventSink`]; transport failures end the loop.

use std::time::Instant;

use log::{debug, error, info, warn};

use super::events::{AppEvent, RunSummary, Throughput};
use super::ports::{EventSink, FrameReport, FrameSink, TriggerSink};
use crate::config::SystemConfig;
use crate::error::{ChecksumError, ConfigError, ReadError, SyncError};
use crate::frame::{AveragedFrame, Frame};
use crate::pipeline::averager::Averager;
use crate::pipeline::detection::{DetectionState, MotionDetector, OccupancyDetector};
use crate::protocol::commands::{START_STREAM, STOP_STREAM, send_command};
use crate::protocol::packet::{Packet, PacketReader};
use crate::protocol::transport::Transport;

/// Whether the frame sink has seen its first frame yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    NotStarted,
    Started,
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A packet was accepted.  `delivered` is set when it completed an
    /// averaging window and a frame went to the sink.
    Packet { sequence: u64, delivered: bool },
    /// Sync failed; nothing was delivered.
    SyncLost(SyncError),
    /// The packet was dropped; nothing was delivered.
    ChecksumMismatch(ChecksumError),
}

/// Owns the pipeline state for one streaming session.
pub struct Controller {
    config: SystemConfig,
    reader: PacketReader,
    averager: Averager,
    occupancy: OccupancyDetector,
    motion: MotionDetector,
    detection: DetectionState,
    render: RenderMode,
    summary: RunSummary,
    started_at: Instant,
}

impl Controller {
    /// Validate `config` and build a controller with empty pipeline state.
    pub fn new(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            reader: PacketReader::new(),
            averager: Averager::new(config.average_window),
            occupancy: OccupancyDetector::new(config.occupancy),
            motion: MotionDetector::new(config.motion),
            detection: DetectionState::new(),
            render: RenderMode::NotStarted,
            summary: RunSummary::default(),
            started_at: Instant::now(),
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Tell the device to start streaming.
    pub fn start<T: Transport>(
        &mut self,
        link: &mut T,
        events: &mut impl EventSink,
    ) -> Result<(), T::Error> {
        if !send_command(link, START_STREAM)? {
            warn!("Start command not accepted by link");
        }
        self.started_at = Instant::now();
        info!(
            "Streaming started (window={}, triggers={:?})",
            self.config.average_window, self.config.trigger_counts
        );
        events.emit(&AppEvent::Started);
        Ok(())
    }

    /// Tell the device to stop streaming.  Best effort: a failed or refused
    /// write is logged and otherwise ignored.
    pub fn shutdown<T: Transport>(&mut self, link: &mut T, events: &mut impl EventSink) -> RunSummary {
        match send_command(link, STOP_STREAM) {
            Ok(true) => {}
            Ok(false) => warn!("Stop command not accepted by link"),
            Err(e) => warn!("Stop command not delivered: {}", e),
        }
        info!(
            "Streaming stopped: packets={} frames={} sync_errors={} checksum_errors={}",
            self.summary.packets,
            self.summary.frames,
            self.summary.sync_errors,
            self.summary.checksum_errors
        );
        events.emit(&AppEvent::Stopped(self.summary));
        self.summary
    }

    /// Start, step until `limit` iterations have run (forever if `None`) or
    /// the link fails, then shut down.  Shutdown happens on both paths.
    pub fn run<T: Transport>(
        &mut self,
        link: &mut T,
        sink: &mut (impl FrameSink + TriggerSink),
        events: &mut impl EventSink,
        limit: Option<u64>,
    ) -> Result<RunSummary, ReadError<T::Error>> {
        if let Err(e) = self.start(link, events) {
            error!("Start command failed: {}", e);
            self.shutdown(link, events);
            return Err(ReadError::Link(e));
        }

        let mut iterations = 0u64;
        while limit.is_none_or(|max| iterations < max) {
            if let Err(e) = self.step(link, sink, events) {
                error!("Stream terminated: {}", e);
                self.shutdown(link, events);
                return Err(e);
            }
            iterations += 1;
        }

        Ok(self.shutdown(link, events))
    }

    // ── Per-packet orchestration ──────────────────────────────

    /// Read and process one packet.
    ///
    /// Returns `Err` only for transport failures and end of stream.
    pub fn step<T: Transport>(
        &mut self,
        link: &mut T,
        sink: &mut (impl FrameSink + TriggerSink),
        events: &mut impl EventSink,
    ) -> Result<Step, ReadError<T::Error>> {
        let packet = match self.reader.read_packet(link) {
            Ok(packet) => packet,
            Err(ReadError::Sync(e)) => {
                self.summary.sync_errors += 1;
                warn!("{}", e);
                events.emit(&AppEvent::SyncLost(e));
                return Ok(Step::SyncLost(e));
            }
            Err(ReadError::Checksum(e)) => {
                self.summary.checksum_errors += 1;
                warn!("{}", e);
                events.emit(&AppEvent::ChecksumMismatch(e));
                return Ok(Step::ChecksumMismatch(e));
            }
            Err(e) => return Err(e),
        };

        let sequence = packet.sequence;
        self.summary.packets = sequence;
        debug!("#{} T={}", sequence, packet.thermistor.raw());

        // 1. Decode + average
        let frame = Frame::decode(&packet.raw.payload);
        let delivered = match self.averager.accumulate(&frame) {
            Some(averaged) => {
                self.classify_and_deliver(averaged, &packet, sink, events);
                true
            }
            None => false,
        };

        // 2. Trigger check (every accepted packet)
        if self.config.is_trigger(sequence) {
            info!("Trigger fired at packet {}", sequence);
            sink.on_trigger(sequence);
            events.emit(&AppEvent::Triggered(sequence));
        }

        // 3. Throughput report
        if self.config.verbose && sequence % u64::from(self.config.stats_interval) == 0 {
            events.emit(&AppEvent::Throughput(self.throughput(&packet)));
        }

        Ok(Step::Packet { sequence, delivered })
    }

    // ── Queries ───────────────────────────────────────────────

    /// Validated packets so far.
    pub fn packet_count(&self) -> u64 {
        self.reader.count()
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render
    }

    // ── Internal ──────────────────────────────────────────────

    fn classify_and_deliver(
        &mut self,
        averaged: AveragedFrame,
        packet: &Packet,
        sink: &mut impl FrameSink,
        events: &mut impl EventSink,
    ) {
        let before = (self.detection.occupancy, self.detection.motion);

        // Occupancy first: motion entry is gated on this cycle's value.
        let occupancy = self.occupancy.update(&mut self.detection, &averaged);
        let motion = self.motion.update(&mut self.detection, &averaged);

        if (occupancy, motion) != before {
            events.emit(&AppEvent::ClassificationChanged { occupancy, motion });
        }

        let report = FrameReport {
            frame: averaged,
            occupancy,
            motion,
            packet_count: packet.sequence,
            thermistor: packet.thermistor.raw(),
        };
        match self.render {
            RenderMode::NotStarted => {
                sink.begin(&report);
                self.render = RenderMode::Started;
            }
            RenderMode::Started => sink.update(&report),
        }
        self.summary.frames += 1;
    }

    fn throughput(&self, packet: &Packet) -> Throughput {
        let elapsed = self.started_at.elapsed().as_secs_f32();
        let packets_per_sec = if elapsed > 0.0 {
            packet.sequence as f32 / elapsed
        } else {
            0.0
        };
        Throughput {
            packets: packet.sequence,
            packets_per_sec,
            thermistor: packet.thermistor.raw(),
        }
    }
}
