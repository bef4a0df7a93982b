use chrono::Datelike;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{MbtiTable, ScoringConfig};
use crate::models::{FilterPolicy, LocationGranularity, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    /// Year ages are computed against; the current UTC year when unset
    pub reference_year: Option<i32>,
    #[serde(default)]
    pub location_granularity: LocationGranularity,
    pub max_batch_size: Option<usize>,
}

impl MatchingSettings {
    pub fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy {
            reference_year: self
                .reference_year
                .unwrap_or_else(|| chrono::Utc::now().year()),
            location_granularity: self.location_granularity,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl ScoringSettings {
    /// Validated scoring configuration with the built-in MBTI table
    pub fn scoring_config(&self) -> Result<ScoringConfig, ConfigError> {
        let weights = ScoringWeights {
            communication: self.weights.communication,
            interest: self.weights.interest,
            mbti: self.weights.mbti,
        };

        ScoringConfig::new(weights, MbtiTable::default())
            .map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_communication_weight")]
    pub communication: f64,
    #[serde(default = "default_interest_weight")]
    pub interest: f64,
    #[serde(default = "default_mbti_weight")]
    pub mbti: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            communication: default_communication_weight(),
            interest: default_interest_weight(),
            mbti: default_mbti_weight(),
        }
    }
}

fn default_communication_weight() -> f64 { crate::models::W_COMM }
fn default_interest_weight() -> f64 { crate::models::W_INTEREST }
fn default_mbti_weight() -> f64 { crate::models::W_MBTI }

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
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with KINDRED__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KINDRED__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("KINDRED")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("KINDRED")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
