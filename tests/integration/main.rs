//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that drives the controller against an
//! in-memory byte stream and recording sinks.  No serial hardware required.

mod controller_tests;
mod detection_flow_tests;
mod mock_sinks;
