//! Occupancy / motion classification driven through the full stream path.

use crate::mock_sinks::{RecordingEvents, RecordingSink, flat, packet, stream_of};

use grideye::app::controller::Controller;
use grideye::app::events::AppEvent;
use grideye::config::{Hysteresis, SystemConfig};
use grideye::frame::Grid;

/// Background at 72 with a 2×2 warm patch of `+heat` whose top-left
/// corner is at (`row`, `col`).  Deviation norm ≈ 1.936 · heat.
fn warm_patch(row: usize, col: usize, heat: i16) -> Grid<i16> {
    let mut grid = flat(72);
    for r in row..row + 2 {
        for c in col..col + 2 {
            grid[r][c] += heat;
        }
    }
    grid
}

fn classify(grids: &[Grid<i16>], config: SystemConfig) -> (Vec<(bool, bool)>, RecordingEvents) {
    let packets: Vec<_> = grids.iter().map(|g| packet(300, g)).collect();
    let mut link = stream_of(&packets);
    let mut sink = RecordingSink::new();
    let mut events = RecordingEvents::new();
    let mut ctl = Controller::new(config).unwrap();
    ctl.run(&mut link, &mut sink, &mut events, Some(grids.len() as u64))
        .unwrap();
    let states = sink.reports().map(|r| (r.occupancy, r.motion)).collect();
    (states, events)
}

#[test]
fn person_enters_moves_and_leaves() {
    let empty = flat(72);
    let here = warm_patch(1, 1, 20);
    let there = warm_patch(5, 5, 20);

    let (states, events) = classify(
        &[empty, here, here, there, there, empty],
        SystemConfig::default(),
    );

    assert_eq!(
        states,
        [
            (false, false), // first frame: motion only records
            (true, true),   // warm patch appears
            (true, false),  // still
            (true, true),   // patch moved
            (true, false),  // still
            (false, false), // left: large change, but nobody there to move
        ]
    );
    let changes = events
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ClassificationChanged { .. }))
        .count();
    assert_eq!(changes, 5);
}

#[test]
fn motion_clears_when_occupant_fades() {
    // Third frame: occupancy norm ≈ 15.5 drops out, while the frame change
    // (norm 24) would keep motion on by itself.
    let (states, _) = classify(
        &[flat(72), warm_patch(2, 2, 20), warm_patch(2, 2, 8)],
        SystemConfig::default(),
    );
    assert_eq!(states, [(false, false), (true, true), (false, false)]);
    assert!(states.iter().all(|(occ, mot)| *occ || !*mot));
}

#[test]
fn faint_patch_stays_unoccupied() {
    let faint = warm_patch(3, 3, 10);
    let (states, _) = classify(&[faint, faint, faint], SystemConfig::default());
    assert!(states.iter().all(|(occ, mot)| !occ && !mot));
}

#[test]
fn dead_band_holds_occupancy() {
    // Norms ≈ 38.7, 27.1, 27.1: enter, then sit inside 25..30.
    let strong = warm_patch(2, 2, 20);
    let weaker = warm_patch(2, 2, 14);
    let (states, _) = classify(&[strong, weaker, weaker], SystemConfig::default());
    let occupancy: Vec<bool> = states.iter().map(|s| s.0).collect();
    assert_eq!(occupancy, [true, true, true]);
}

#[test]
fn thresholds_are_configurable() {
    let config = SystemConfig {
        occupancy: Hysteresis::new(10.0, 5.0),
        ..SystemConfig::default()
    };
    let faint = warm_patch(3, 3, 10);
    let (states, _) = classify(&[faint], config);
    assert_eq!(states, [(true, false)]);
}
