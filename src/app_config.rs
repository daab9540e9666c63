use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Coordinator configuration module
/// This module handles loading, validating and saving the settings that tune
/// the translation session: readiness polling, default languages and logging.
/// Represents the coordinator configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CoordinatorConfig {
    /// Interval between readiness polls, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum number of readiness poll retries before giving up
    #[serde(default = "default_max_poll_retries")]
    pub max_poll_retries: u32,

    /// Source language requested when the user command does not name one.
    /// The sentinel "auto" asks the engine to detect the page language.
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_poll_retries() -> u32 {
    6
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_retries: default_max_poll_retries(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            log_level: LogLevel::default(),
        }
    }
}

impl CoordinatorConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(anyhow!("Poll interval must be greater than zero"));
        }

        if self.source_language.is_empty() {
            return Err(anyhow!("Source language must not be empty"));
        }

        if self.target_language.is_empty() {
            return Err(anyhow!("Target language must not be empty"));
        }

        // "auto" is only meaningful as a source
        if self.target_language == "auto" {
            return Err(anyhow!("Target language cannot be 'auto'"));
        }

        Ok(())
    }

    /// Interval between readiness polls as a duration
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}
