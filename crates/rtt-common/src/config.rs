//! Configuration for the benchmark harness.
//!
//! Supports TOML deserialization with defaults matching the canonical
//! benchmark constants, so an empty config runs the standard measurement.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level benchmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of successful round trips to record.
    pub trials: u64,

    /// Unmeasured exchanges run before the measured loop.
    pub warmup: u64,

    /// Thread placement configuration.
    pub placement: PlacementConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            trials: 100_000,
            warmup: 0,
            placement: PlacementConfig::default(),
        }
    }
}

/// Placement of the two benchmark threads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlacementConfig {
    /// Core the responder thread is pinned to.
    pub responder_core: usize,

    /// Core the initiator (calling) thread is pinned to. `None` leaves it
    /// wherever the OS scheduled it.
    pub initiator_core: Option<usize>,

    /// Scheduler policy applied to the responder thread.
    pub policy: SchedPolicy,

    /// Scheduler priority applied alongside the affinity mask.
    pub priority: u8,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            responder_core: 1,
            initiator_core: Some(0),
            policy: SchedPolicy::Fifo,
            priority: 20,
        }
    }
}

/// Scheduler policy for the responder thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchedPolicy {
    /// SCHED_FIFO: first-in-first-out real-time.
    #[default]
    Fifo,
    /// SCHED_RR: round-robin real-time.
    Rr,
    /// SCHED_OTHER: normal time-sharing (non-RT).
    Other,
}

impl BenchConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Sanity-check the configuration.
    ///
    /// # Errors
    ///
    /// Rejects a zero trial count and co-located threads: the benchmark
    /// measures cross-core signaling, so the two cores must differ.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::Invalid("trials must be at least 1".into()));
        }
        if self.placement.initiator_core == Some(self.placement.responder_core) {
            return Err(ConfigError::Invalid(format!(
                "initiator and responder share core {}; pick distinct cores",
                self.placement.responder_core
            )));
        }
        Ok(())
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Semantically invalid configuration.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
