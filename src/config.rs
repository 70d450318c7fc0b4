use config::{Config as ConfigBuilder, ConfigError, Environment, File};

use crate::error::AppError;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub advisory: AdvisoryConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// OpenAI-compatible chat completions endpoint used for shopping advice
#[derive(Debug, Deserialize, Clone)]
pub struct AdvisoryConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_advisory_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_advisory_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            model: default_advisory_model(),
            api_key: String::new(),
            timeout_ms: default_advisory_timeout_ms(),
        }
    }
}

impl AdvisoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_advisory_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_advisory_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PANTRY__ADVISORY__ENDPOINT, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("advisory.enabled", false)?
            .set_default("advisory.timeout_ms", default_advisory_timeout_ms())?
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.format", default_log_format())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PANTRY")
                .separator("__")
                .try_parsing(true),
        );

        // Unprefixed key, as most providers document it
        if let Ok(api_key) = env::var("ADVISORY_API_KEY") {
            builder = builder.set_override("advisory.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load and validate, as the CLI does at startup
    pub fn load_checked(config_path: Option<String>) -> Result<Self, AppError> {
        let config = Self::load(config_path)?;
        config.validate().map_err(AppError::ValidationError)?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.advisory.timeout_ms == 0 {
            return Err("Advisory timeout_ms must be greater than 0".to_string());
        }
        if self.advisory.enabled && self.advisory.endpoint.trim().is_empty() {
            return Err("Advisory endpoint is required when advisory is enabled".to_string());
        }
        if !matches!(self.observability.format.as_str(), "pretty" | "json") {
            return Err(format!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                self.observability.format
            ));
        }
        Ok(())
    }
}
