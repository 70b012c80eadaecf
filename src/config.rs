use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::Matcher;
use crate::models::{BatchOptions, MatchOptions};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub batch: BatchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Single-entity lookup defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub max_distance_km: Option<f64>,
    pub min_score: Option<u32>,
    pub max_results: Option<usize>,
    #[serde(default)]
    pub parallel: bool,
}

impl MatchingSettings {
    pub fn options(&self) -> MatchOptions {
        let defaults = MatchOptions::default();
        MatchOptions {
            max_distance_km: self.max_distance_km.unwrap_or(defaults.max_distance_km),
            min_score: self.min_score.unwrap_or(defaults.min_score),
            max_results: self.max_results.unwrap_or(defaults.max_results),
        }
    }
}

/// Auto-match defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchSettings {
    pub max_distance_km: Option<f64>,
    pub min_score: Option<u32>,
    pub max_matches_per_need: Option<usize>,
}

impl BatchSettings {
    pub fn options(&self) -> BatchOptions {
        let defaults = BatchOptions::default();
        BatchOptions {
            max_distance_km: self.max_distance_km.unwrap_or(defaults.max_distance_km),
            min_score: self.min_score.unwrap_or(defaults.min_score),
            max_matches_per_need: self
                .max_matches_per_need
                .unwrap_or(defaults.max_matches_per_need),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with AID_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AID_MATCH__MATCHING__MIN_SCORE -> matching.min_score
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Build a matcher honouring the configured parallelism
    pub fn matcher(&self) -> Matcher {
        Matcher::new().with_parallelism(self.matching.parallel)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("AID_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
