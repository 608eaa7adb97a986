//! Session configuration types and builders

use crate::error::ConfigError;
use formflow_validation::Locale;
use serde::{Deserialize, Serialize};
use service_builder::builder;
use std::env;
use std::time::Duration;

pub const AUTO_RESET_ENV: &str = "FORMFLOW_AUTO_RESET_MS";
pub const LATENCY_ENV: &str = "FORMFLOW_LATENCY_MS";
pub const LOCALE_ENV: &str = "FORMFLOW_LOCALE";
pub const LOG_LEVEL_ENV: &str = "FORMFLOW_LOG_LEVEL";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration of one form session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[builder]
pub struct SessionConfig {
    /// How long the success notice stays before the session returns to idle
    #[builder(default = "Duration::from_secs(5)", getter)]
    pub auto_reset_after: Duration,

    /// Delay of the simulated submit collaborator
    #[builder(default = "Duration::from_secs(1)", getter)]
    pub simulated_latency: Duration,

    /// Language of validation messages and the success notice
    #[builder(default = "Locale::En", getter)]
    pub locale: Locale,

    /// Log level filter used when no env filter is set
    #[builder(default = "\"info\".to_string()", getter)]
    pub log_level: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_reset_after: Duration::from_secs(5),
            simulated_latency: Duration::from_secs(1),
            locale: Locale::En,
            log_level: "info".to_string(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from `FORMFLOW_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SessionConfig::default();

        if let Some(raw) = lookup(AUTO_RESET_ENV) {
            config.auto_reset_after = parse_millis(AUTO_RESET_ENV, &raw)?;
        }
        if let Some(raw) = lookup(LATENCY_ENV) {
            config.simulated_latency = parse_millis(LATENCY_ENV, &raw)?;
        }
        if let Some(raw) = lookup(LOCALE_ENV) {
            config.locale = raw
                .parse()
                .map_err(|_| ConfigError::invalid(LOCALE_ENV, raw.as_str(), "en or uk"))?;
        }
        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            config.log_level = raw.to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    /// Same configuration with another message language
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_reset_after.is_zero() {
            return Err(ConfigError::ValidationFailed {
                field: "auto_reset_after".to_string(),
                reason: "Auto-reset window must be longer than zero".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "log_level",
                self.log_level.as_str(),
                "trace, debug, info, warn, or error",
            ));
        }

        Ok(())
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::invalid(key, raw, "a whole number of milliseconds"))
}

impl SessionConfigBuilder {
    /// Create a development configuration with verbose logging
    pub fn development() -> Self {
        SessionConfigBuilder::new()
            .simulated_latency(Duration::from_secs(1))
            .log_level("debug".to_string())
    }

    /// Create a production configuration without artificial latency
    pub fn production() -> Self {
        SessionConfigBuilder::new()
            .simulated_latency(Duration::ZERO)
            .log_level("info".to_string())
    }

    /// Create a testing configuration with minimal overhead
    pub fn testing() -> Self {
        SessionConfigBuilder::new()
            .simulated_latency(Duration::from_millis(10))
            .log_level("warn".to_string())
    }
}
