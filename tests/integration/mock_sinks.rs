//! Recording sinks and stream builders for integration tests.
//!
//! Every collaborator call is captured so tests can assert on the full
//! delivery history.

use grideye::adapters::replay::ReplayTransport;
use grideye::app::events::AppEvent;
use grideye::app::ports::{EventSink, FrameReport, FrameSink, TriggerSink};
use grideye::frame::{GRID, Grid};
use grideye::protocol::PACKET_WIDTH;
use grideye::protocol::packet::encode_packet;

// ── Frame + trigger recorder ──────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Begin,
    Update,
}

#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<(Delivery, FrameReport)>,
    pub triggers: Vec<u64>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> impl Iterator<Item = &FrameReport> {
        self.frames.iter().map(|(_, r)| r)
    }

    pub fn packet_counts(&self) -> Vec<u64> {
        self.reports().map(|r| r.packet_count).collect()
    }
}

impl FrameSink for RecordingSink {
    fn begin(&mut self, report: &FrameReport) {
        self.frames.push((Delivery::Begin, *report));
    }

    fn update(&mut self, report: &FrameReport) {
        self.frames.push((Delivery::Update, *report));
    }
}

impl TriggerSink for RecordingSink {
    fn on_trigger(&mut self, packet_count: u64) {
        self.triggers.push(packet_count);
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checksum_errors(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ChecksumMismatch(_)))
            .count()
    }

    pub fn sync_errors(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::SyncLost(_)))
            .count()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Stream builders ───────────────────────────────────────────

#[allow(dead_code)]
pub fn flat(value: i16) -> Grid<i16> {
    [[value; GRID]; GRID]
}

#[allow(dead_code)]
pub fn packet(thermistor: i16, grid: &Grid<i16>) -> [u8; PACKET_WIDTH] {
    encode_packet(thermistor, grid)
}

#[allow(dead_code)]
pub fn corrupted(thermistor: i16, grid: &Grid<i16>) -> [u8; PACKET_WIDTH] {
    let mut bytes = encode_packet(thermistor, grid);
    bytes[PACKET_WIDTH - 1] ^= 0xFF;
    bytes
}

#[allow(dead_code)]
pub fn stream_of(packets: &[[u8; PACKET_WIDTH]]) -> ReplayTransport {
    let mut link = ReplayTransport::new();
    for p in packets {
        link.inject(p);
    }
    link
}
