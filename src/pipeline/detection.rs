//! Occupancy and motion classification with hysteresis.
//!
//! Both detectors reduce an averaged frame to a scalar norm and run it
//! through a two-level threshold rule:
//!
//! | Detector  | Norm                                  | Enter | Exit |
//! |-----------|---------------------------------------|-------|------|
//! | Occupancy | ‖frame − mean(frame)‖                 | 30.0  | 25.0 |
//! | Motion    | ‖frame − previous averaged frame‖     | 20.0  | 13.0 |
//!
//! Motion is only reported while occupancy is set: losing occupancy clears
//! motion in the same cycle.  The detectors must be run occupancy first, so
//! motion sees this cycle's occupancy value.

use log::debug;

use crate::config::Hysteresis;
use crate::frame::AveragedFrame;

/// Classification state carried across averaged frames.
#[derive(Debug, Clone, Default)]
pub struct DetectionState {
    pub occupancy: bool,
    pub motion: bool,
    previous: Option<AveragedFrame>,
}

impl DetectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The averaged frame seen by the last motion update.
    pub fn previous_frame(&self) -> Option<&AveragedFrame> {
        self.previous.as_ref()
    }
}

/// Detects a warm body against the background.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyDetector {
    thresholds: Hysteresis,
}

impl OccupancyDetector {
    pub fn new(thresholds: Hysteresis) -> Self {
        Self { thresholds }
    }

    /// Update and return the occupancy state.
    pub fn update(&self, state: &mut DetectionState, frame: &AveragedFrame) -> bool {
        let norm = frame.deviation_norm();
        let next = self.thresholds.apply(state.occupancy, norm);
        if next != state.occupancy {
            debug!("occupancy {} -> {} (norm={:.2})", state.occupancy, next, norm);
        }
        state.occupancy = next;
        next
    }
}

/// Detects frame-to-frame change while the space is occupied.
#[derive(Debug, Clone, Copy)]
pub struct MotionDetector {
    thresholds: Hysteresis,
}

impl MotionDetector {
    pub fn new(thresholds: Hysteresis) -> Self {
        Self { thresholds }
    }

    /// Update and return the motion state.
    ///
    /// The first call only records the frame.  Every call leaves `frame` as
    /// the new reference for the next one.  Motion is false whenever
    /// `state.occupancy` is false.
    pub fn update(&self, state: &mut DetectionState, frame: &AveragedFrame) -> bool {
        if let Some(previous) = state.previous.replace(*frame) {
            let norm = frame.distance(&previous);
            let next = state.occupancy && self.thresholds.apply(state.motion, norm);
            if next != state.motion {
                debug!("motion {} -> {} (norm={:.2})", state.motion, next, norm);
            }
            state.motion = next;
        } else {
            state.motion = false;
        }
        state.motion
    }
}
