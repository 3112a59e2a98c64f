//! GridEye stream reader library.
//!
//! Recovers 134-byte packets from the sensor's unsynchronized serial
//! stream, validates and decodes them into 8×8 thermal frames, and runs
//! the averaging / occupancy / motion pipeline.  Rendering, export and
//! port setup stay outside, behind the traits in [`app::ports`].
//!
//! The serial adapter is only built with the `serial` feature; everything
//! else runs on any host, fed from [`adapters::replay::ReplayTransport`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod protocol;
