//! Configuration loading from TOML and environment variables.
//!
//! The CLI reads its configuration from:
//! 1. A TOML config file (passed with `--config`)
//! 2. Environment variables (override TOML values)
//! 3. Command-line flags (override both)
//!
//! Environment variable prefix: REFRESHABLE_

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default interval between simulated refreshes, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Default number of simulated refresh cycles.
pub const DEFAULT_TICKS: u32 = 6;

/// Default outcome pattern: `s` succeeds, `f` fails.
pub const DEFAULT_PATTERN: &str = "ssfsff";

/// Default capacity of the driver's event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Refresh simulation configuration.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "refreshable_cli=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output JSON-formatted logs.
    #[serde(default)]
    pub json_format: bool,
}

/// Simulated data source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Interval between refresh requests in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Number of refresh cycles to run.
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    /// Outcome of each cycle, repeated as needed (`s` = success, `f` = failure).
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Capacity of the event channel feeding the driver.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

// -- Defaults --

fn default_log_level() -> String {
    "info".to_string()
}
fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}
fn default_ticks() -> u32 {
    DEFAULT_TICKS
}
fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}
fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            ticks: default_ticks(),
            pattern: default_pattern(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl SimulationConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from an optional TOML file, then apply
    /// `REFRESHABLE_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = if let Some(path) = path {
            if path.exists() {
                Self::from_file(path)?
            } else {
                tracing::warn!(
                    path = %path.display(),
                    "Config file not found, using defaults"
                );
                Self::default()
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("REFRESHABLE_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("REFRESHABLE_LOG_JSON") {
            self.logging.json_format = val == "true" || val == "1";
        }
        if let Ok(val) = std::env::var("REFRESHABLE_INTERVAL_MS") {
            if let Ok(ms) = val.parse() {
                self.simulation.interval_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("REFRESHABLE_TICKS") {
            if let Ok(n) = val.parse() {
                self.simulation.ticks = n;
            }
        }
        if let Ok(val) = std::env::var("REFRESHABLE_PATTERN") {
            self.simulation.pattern = val;
        }
    }
}
