//! System configuration parameters
//!
//! All tunable parameters for the stream reader and its classifiers.
//! Defaults match the values the thresholds were tuned against; every one
//! of them can be overridden from a JSON config file.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Maximum number of configured trigger counts.
pub const MAX_TRIGGERS: usize = 16;

/// Two-level (Schmitt-trigger) threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hysteresis {
    /// Norm above which the state switches on.
    pub enter: f32,
    /// Norm below which the state switches off.
    pub exit: f32,
}

impl Hysteresis {
    pub const fn new(enter: f32, exit: f32) -> Self {
        Self { enter, exit }
    }

    /// Apply the rule to `value`, keeping `active` inside the dead band.
    pub fn apply(&self, active: bool, value: f32) -> bool {
        if value > self.enter {
            true
        } else if value < self.exit {
            false
        } else {
            active
        }
    }

    fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        if !self.enter.is_finite() || !self.exit.is_finite() {
            return Err(ConfigError::ValidationFailed(what));
        }
        if self.enter < self.exit || self.exit < 0.0 {
            return Err(ConfigError::ValidationFailed(what));
        }
        Ok(())
    }
}

/// Serial link settings (consumed by the serial adapter only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Serial device path.
    pub port: String,
    /// Line rate in baud.
    pub baud_rate: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".into(),
            baud_rate: 115_200,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Averaging ---
    /// Frames per averaging window (1 = no averaging)
    pub average_window: u16,

    // --- Triggers ---
    /// Packet counts at which the trigger collaborator fires once.
    /// Holds at most [`MAX_TRIGGERS`] entries; a longer list fails to parse.
    #[serde(deserialize_with = "bounded_triggers")]
    pub trigger_counts: heapless::Vec<u64, MAX_TRIGGERS>,

    // --- Classification ---
    /// Deviation-from-mean norm thresholds for occupancy
    pub occupancy: Hysteresis,
    /// Frame-to-frame difference norm thresholds for motion
    pub motion: Hysteresis,

    // --- Diagnostics ---
    /// Emit throughput reports while streaming
    pub verbose: bool,
    /// Packets between throughput reports
    pub stats_interval: u32,

    // --- Link ---
    pub link: LinkConfig,
}

fn bounded_triggers<'de, D>(deserializer: D) -> Result<heapless::Vec<u64, MAX_TRIGGERS>, D::Error>
where
    D: Deserializer<'de>,
{
    let counts = Vec::<u64>::deserialize(deserializer)?;
    let len = counts.len();
    heapless::Vec::from_slice(&counts).map_err(|()| {
        serde::de::Error::custom(format_args!(
            "trigger_counts holds at most {MAX_TRIGGERS} entries, got {len}"
        ))
    })
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            average_window: 1,
            trigger_counts: heapless::Vec::new(),

            occupancy: Hysteresis::new(30.0, 25.0),
            motion: Hysteresis::new(20.0, 13.0),

            verbose: false,
            stats_interval: 100,

            link: LinkConfig::default(),
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.average_window == 0 {
            return Err(ConfigError::ValidationFailed("average_window must be >= 1"));
        }
        if self.stats_interval == 0 {
            return Err(ConfigError::ValidationFailed("stats_interval must be >= 1"));
        }
        self.occupancy
            .validate("occupancy thresholds must be finite, non-negative, enter >= exit")?;
        self.motion
            .validate("motion thresholds must be finite, non-negative, enter >= exit")?;
        Ok(())
    }

    /// Whether `count` is one of the configured trigger counts.
    pub fn is_trigger(&self, count: u64) -> bool {
        self.trigger_counts.contains(&count)
    }
}
