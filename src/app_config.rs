use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::bang_detector::{DEFAULT_DEDUP_WINDOW_SECS, DEFAULT_OVERLAP_THRESHOLD};
use crate::errors::ConfigError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Keyword stem to scan for
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Time window in seconds within which near-duplicate hits merge
    #[serde(default = "default_dedup_window_secs")]
    pub dedup_window_secs: u64,

    /// Word-overlap ratio above which two transcripts are duplicates
    #[serde(default = "default_overlap_threshold")]
    pub overlap_threshold: f64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_keyword() -> String {
    "bang".to_string()
}

fn default_dedup_window_secs() -> u64 {
    DEFAULT_DEDUP_WINDOW_SECS
}

fn default_overlap_threshold() -> f64 {
    DEFAULT_OVERLAP_THRESHOLD
}

impl Config {
    /// Reject configuration that would make every scan meaningless.
    ///
    /// A blank keyword matches nothing and an overlap threshold outside
    /// [0, 1] can never be exceeded or is always exceeded, so both fail
    /// fast here instead of degrading every downstream result.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyword.trim().is_empty() {
            return Err(ConfigError::EmptyKeyword);
        }

        if !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err(ConfigError::InvalidOverlapThreshold(
                self.overlap_threshold,
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            keyword: default_keyword(),
            dedup_window_secs: default_dedup_window_secs(),
            overlap_threshold: default_overlap_threshold(),
            log_level: LogLevel::default(),
        }
    }
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
