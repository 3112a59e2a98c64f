//! End-to-end: byte stream → controller → sinks.

use crate::mock_sinks::{
    Delivery, RecordingEvents, RecordingSink, corrupted, flat, packet, stream_of,
};

use grideye::app::controller::{Controller, Step};
use grideye::app::events::AppEvent;
use grideye::config::SystemConfig;
use grideye::error::ReadError;
use grideye::protocol::commands::{START_STREAM, STOP_STREAM};

fn controller(config: SystemConfig) -> Controller {
    Controller::new(config).expect("valid config")
}

// ── Five clean packets, no averaging ──────────────────────────

#[test]
fn five_constant_packets_deliver_five_frames() {
    let grid = flat(72);
    let mut link = stream_of(&[packet(250, &grid); 5]);
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(SystemConfig::default());

    let summary = ctl.run(&mut link, &mut sink, &mut events, Some(5)).unwrap();

    assert_eq!(sink.packet_counts(), [1, 2, 3, 4, 5]);
    for report in sink.reports() {
        assert!(report.frame.cells().iter().flatten().all(|v| *v == 72.0));
        assert!(!report.occupancy);
        assert!(!report.motion);
        assert_eq!(report.thermistor, 250);
    }
    assert_eq!(sink.frames[0].0, Delivery::Begin);
    assert!(sink.frames[1..].iter().all(|(d, _)| *d == Delivery::Update));
    assert_eq!(summary.packets, 5);
    assert_eq!(summary.frames, 5);
    assert_eq!(link.written(), [START_STREAM, STOP_STREAM]);
}

// ── Corrupted packet followed by a valid one ──────────────────

#[test]
fn corrupted_packet_is_dropped_and_not_counted() {
    let grid = flat(72);
    let mut link = stream_of(&[corrupted(250, &grid), packet(250, &grid)]);
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(SystemConfig::default());

    let first = ctl.step(&mut link, &mut sink, &mut events).unwrap();
    assert!(matches!(first, Step::ChecksumMismatch(_)));
    assert!(sink.frames.is_empty());

    let second = ctl.step(&mut link, &mut sink, &mut events).unwrap();
    assert_eq!(second, Step::Packet { sequence: 1, delivered: true });

    assert_eq!(events.checksum_errors(), 1);
    assert_eq!(sink.packet_counts(), [1]);
    assert_eq!(ctl.packet_count(), 1);
}

// ── Resync after line noise ───────────────────────────────────

#[test]
fn noise_between_packets_is_skipped() {
    let grid = flat(80);
    let mut link = stream_of(&[packet(100, &grid)]);
    link.inject(&[0x00, 0x13, 0x37, 0x42]);
    link.inject(&packet(101, &grid));
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(SystemConfig::default());

    for _ in 0..2 {
        ctl.step(&mut link, &mut sink, &mut events).unwrap();
    }
    assert_eq!(sink.packet_counts(), [1, 2]);
    assert_eq!(events.sync_errors(), 0);
}

#[test]
fn dead_air_reports_sync_loss_then_recovers() {
    let grid = flat(80);
    let mut link = stream_of(&[]);
    link.inject(&[0x11; 134]);
    link.inject(&packet(1, &grid));
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(SystemConfig::default());

    let first = ctl.step(&mut link, &mut sink, &mut events).unwrap();
    assert!(matches!(first, Step::SyncLost(_)));
    let second = ctl.step(&mut link, &mut sink, &mut events).unwrap();
    assert_eq!(second, Step::Packet { sequence: 1, delivered: true });
    assert_eq!(events.sync_errors(), 1);
    assert_eq!(ctl.summary().sync_errors, 1);
}

// ── Triggers ──────────────────────────────────────────────────

#[test]
fn triggers_fire_once_per_configured_count() {
    let mut config = SystemConfig::default();
    config.trigger_counts.push(2).unwrap();
    config.trigger_counts.push(4).unwrap();
    let grid = flat(72);
    let mut link = stream_of(&[packet(250, &grid); 5]);
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(config);

    ctl.run(&mut link, &mut sink, &mut events, Some(5)).unwrap();

    assert_eq!(sink.triggers, [2, 4]);
}

#[test]
fn corrupted_packets_do_not_advance_trigger_counter() {
    let mut config = SystemConfig::default();
    config.trigger_counts.push(2).unwrap();
    let grid = flat(72);
    let mut link = stream_of(&[
        packet(250, &grid),
        corrupted(250, &grid),
        packet(250, &grid),
    ]);
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(config);

    ctl.run(&mut link, &mut sink, &mut events, Some(3)).unwrap();

    assert_eq!(sink.triggers, [2]);
    assert!(events.events.contains(&AppEvent::Triggered(2)));
}

// ── Averaging window ──────────────────────────────────────────

#[test]
fn averaging_window_delivers_every_nth_packet() {
    let config = SystemConfig {
        average_window: 3,
        ..SystemConfig::default()
    };
    let mut link = stream_of(&[
        packet(0, &flat(10)),
        packet(0, &flat(20)),
        packet(0, &flat(30)),
        packet(0, &flat(40)),
    ]);
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(config);

    ctl.run(&mut link, &mut sink, &mut events, Some(4)).unwrap();

    assert_eq!(sink.packet_counts(), [3]);
    let mean = sink.frames[0].1.frame.get(2, 5);
    assert!((mean - 20.0).abs() < 1e-4);
}

// ── Fatal conditions ──────────────────────────────────────────

#[test]
fn truncated_stream_is_fatal_and_stops_device() {
    let bytes = packet(250, &flat(72));
    let mut link = stream_of(&[]);
    link.inject(&bytes[..70]);
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = controller(SystemConfig::default());

    let err = ctl.run(&mut link, &mut sink, &mut events, None).unwrap_err();

    assert!(matches!(err, ReadError::Closed));
    assert!(sink.frames.is_empty());
    assert_eq!(link.written(), [START_STREAM, STOP_STREAM]);
    assert!(matches!(events.events.last(), Some(AppEvent::Stopped(_))));
}
