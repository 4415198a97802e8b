//! # Configuration Module
//!
//! Handles loading and validating recorder configuration from TOML files.
//!
//! The trace folder itself is not configured here; the orchestrator resolves
//! it and hands it to the session controller.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RecorderConfig {
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Poller intervals
#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    #[serde(default = "default_camera_interval_ms")]
    pub camera_interval_ms: u64,

    #[serde(default = "default_gps_interval_ms")]
    pub gps_interval_ms: u64,

    #[serde(default = "default_screen_interval_ms")]
    pub screen_interval_ms: u64,

    #[serde(default = "default_capacity_interval_ms")]
    pub capacity_interval_ms: u64,
}

/// Storage headroom guard configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CapacityConfig {
    #[serde(default = "default_min_free_kb")]
    pub min_free_kb: u64,
}

/// Camera activity heuristic configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    #[serde(default = "default_process_keyword")]
    pub process_keyword: String,
}

/// Diagnostic logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub file: Option<String>,
}

// Default value functions
fn default_camera_interval_ms() -> u64 { 500 }
fn default_gps_interval_ms() -> u64 { 500 }
fn default_screen_interval_ms() -> u64 { 500 }
fn default_capacity_interval_ms() -> u64 { 5000 }

fn default_min_free_kb() -> u64 { 2048 }

fn default_process_keyword() -> String { "camera".to_string() }

fn default_log_level() -> String { "info".to_string() }

/// Accepted values for `logging.level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            camera_interval_ms: default_camera_interval_ms(),
            gps_interval_ms: default_gps_interval_ms(),
            screen_interval_ms: default_screen_interval_ms(),
            capacity_interval_ms: default_capacity_interval_ms(),
        }
    }
}

impl PollingConfig {
    pub fn camera_interval(&self) -> Duration {
        Duration::from_millis(self.camera_interval_ms)
    }

    pub fn gps_interval(&self) -> Duration {
        Duration::from_millis(self.gps_interval_ms)
    }

    pub fn screen_interval(&self) -> Duration {
        Duration::from_millis(self.screen_interval_ms)
    }

    pub fn capacity_interval(&self) -> Duration {
        Duration::from_millis(self.capacity_interval_ms)
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self { min_free_kb: default_min_free_kb() }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { process_keyword: default_process_keyword() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl RecorderConfig {
    /// Load configuration from a TOML file
    ///
    /// Missing sections and fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use peripheral_trace::config::RecorderConfig;
    ///
    /// let config = RecorderConfig::load("config/recorder.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: RecorderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("camera_interval_ms", self.polling.camera_interval_ms),
            ("gps_interval_ms", self.polling.gps_interval_ms),
            ("screen_interval_ms", self.polling.screen_interval_ms),
            ("capacity_interval_ms", self.polling.capacity_interval_ms),
        ] {
            if value == 0 || value > 60000 {
                return Err(crate::error::RecorderError::Config(
                    toml::de::Error::custom(format!("{} must be between 1 and 60000", name))
                ));
            }
        }

        if self.capacity.min_free_kb == 0 {
            return Err(crate::error::RecorderError::Config(
                toml::de::Error::custom("min_free_kb must be greater than 0")
            ));
        }

        if self.camera.process_keyword.trim().is_empty() {
            return Err(crate::error::RecorderError::Config(
                toml::de::Error::custom("camera process_keyword cannot be empty")
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(crate::error::RecorderError::Config(
                toml::de::Error::custom("logging level must be one of: trace, debug, info, warn, error")
            ));
        }

        if matches!(&self.logging.file, Some(file) if file.is_empty()) {
            return Err(crate::error::RecorderError::Config(
                toml::de::Error::custom("logging file cannot be empty when set")
            ));
        }

        Ok(())
    }
}
