//! GridEye stream reader — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │  SerialTransport   LogFrameSink        LogEventSink      │
//! │  (Transport)       (Frame+TriggerSink) (EventSink)       │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ Controller: sync · checksum · average · classify   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from the JSON file named by `GRIDEYE_CONFIG`, or
//! defaults.  SIGINT/SIGTERM stop the loop and the device stream.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use log::info;
use signal_hook::consts::{SIGINT, SIGTERM};

use grideye::adapters::log_sink::{LogEventSink, LogFrameSink};
use grideye::adapters::serial::SerialTransport;
use grideye::app::controller::Controller;
use grideye::config::SystemConfig;
use grideye::error::ReadError;

fn load_config() -> Result<SystemConfig> {
    match std::env::var("GRIDEYE_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let config = SystemConfig::from_json(&text)?;
            info!("Config loaded from {}", path);
            Ok(config)
        }
        Err(_) => {
            info!("GRIDEYE_CONFIG not set, using defaults");
            Ok(SystemConfig::default())
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("GridEye v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGINT, Arc::clone(&stop))?;
    signal_hook::flag::register(SIGTERM, Arc::clone(&stop))?;

    let mut link = SerialTransport::open(&config.link)
        .with_context(|| format!("opening {}", config.link.port))?
        .with_stop_flag(Arc::clone(&stop));

    let mut controller = Controller::new(config)?;
    let mut frames = LogFrameSink::new();
    let mut events = LogEventSink::new();

    match controller.run(&mut link, &mut frames, &mut events, None) {
        Ok(_) => Ok(()),
        Err(ReadError::Link(e))
            if e.kind() == io::ErrorKind::Interrupted && stop.load(Ordering::Relaxed) =>
        {
            info!("Stopped by signal");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
