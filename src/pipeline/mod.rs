//! Streaming signal-processing stages fed by decoded frames.
//!
//! ```text
//!  Frame ──▶ Averager ──▶ AveragedFrame ──┬─▶ OccupancyDetector
//!                                         └─▶ MotionDetector (gated by occupancy)
//! ```
//!
//! Every stage is owned by the controller and threaded through explicitly;
//! there is no shared pipeline state.

pub mod averager;
pub mod detection;
