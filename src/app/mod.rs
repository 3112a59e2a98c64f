//! Application core — pipeline orchestration, zero direct I/O.
//!
//! The [`controller`] drives the read → decode → average → classify loop.
//! Everything outside the loop (rendering, snapshot export, logging) sits
//! behind the **port traits** in [`ports`], so the core is testable with an
//! in-memory byte source and recording sinks.

pub mod controller;
pub mod events;
pub mod ports;
