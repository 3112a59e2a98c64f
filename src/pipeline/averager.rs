//! Fixed-window frame averaging.
//!
//! Frames are summed exactly in integer space and divided once per window,
//! so a window of N identical frames averages back to that frame.

use crate::frame::{AveragedFrame, Frame, GRID, Grid};

/// Running sum and sample counter for one averaging window.
#[derive(Debug, Clone)]
pub struct AverageAccumulator {
    sum: Grid<i64>,
    samples: u16,
}

impl AverageAccumulator {
    fn empty() -> Self {
        Self {
            sum: [[0; GRID]; GRID],
            samples: 0,
        }
    }
}

/// Emits the mean of every `window` consecutive frames.
#[derive(Debug, Clone)]
pub struct Averager {
    window: u16,
    acc: AverageAccumulator,
}

impl Averager {
    /// `window` is clamped to at least 1.
    pub fn new(window: u16) -> Self {
        Self {
            window: window.max(1),
            acc: AverageAccumulator::empty(),
        }
    }

    /// Frames accumulated toward the current window, always `< window`.
    pub fn pending(&self) -> u16 {
        self.acc.samples
    }

    /// Add `frame`; returns the completed average when the window fills.
    pub fn accumulate(&mut self, frame: &Frame) -> Option<AveragedFrame> {
        if self.window == 1 {
            return Some(AveragedFrame::from(frame));
        }

        for (sum_row, row) in self.acc.sum.iter_mut().zip(frame.cells().iter()) {
            for (sum, value) in sum_row.iter_mut().zip(row.iter()) {
                *sum += i64::from(*value);
            }
        }
        self.acc.samples += 1;

        if self.acc.samples < self.window {
            return None;
        }

        let n = f64::from(self.window);
        let mut mean = [[0.0f32; GRID]; GRID];
        for (dst, src) in mean.iter_mut().zip(self.acc.sum.iter()) {
            for (d, s) in dst.iter_mut().zip(src.iter()) {
                *d = (*s as f64 / n) as f32;
            }
        }
        self.acc = AverageAccumulator::empty();
        Some(AveragedFrame::from_grid(mean))
    }
}
