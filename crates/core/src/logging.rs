//! Structured logging setup built on `tracing-subscriber`

use serde_json::{json, Value};
use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration for formflow binaries and tests
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "warn")
    pub level: String,
    /// Emit JSON lines instead of text
    pub json_format: bool,
    /// Multi-line pretty output for development
    pub pretty_print: bool,
    /// Include file and line number information
    pub include_location: bool,
    /// Fields announced once when logging starts
    pub global_fields: serde_json::Map<String, Value>,
    /// Environment filter (e.g. "formflow_core=debug,warn")
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            pretty_print: false,
            include_location: false,
            global_fields: serde_json::Map::new(),
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            pretty_print: false,
            include_location: false,
            global_fields: env_field("production"),
            env_filter: Some("formflow_core=info,formflow_validation=warn".to_string()),
        }
    }

    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            pretty_print: true,
            include_location: true,
            global_fields: env_field("development"),
            env_filter: Some("formflow_core=debug,formflow_validation=debug".to_string()),
        }
    }

    /// Minimal output
    pub fn test() -> Self {
        Self {
            level: "error".to_string(),
            json_format: false,
            pretty_print: false,
            include_location: false,
            global_fields: env_field("test"),
            env_filter: Some("formflow_core=error".to_string()),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_global_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.global_fields.insert(key.into(), value.into());
        self
    }

    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn directive(&self) -> &str {
        self.env_filter.as_deref().unwrap_or(&self.level)
    }
}

fn env_field(env: &str) -> serde_json::Map<String, Value> {
    let mut fields = serde_json::Map::new();
    fields.insert("env".to_string(), json!(env));
    fields
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed or the filter does not parse.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(config.directive()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let layer = Layer::new()
        .with_writer(io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        registry.with(layer.json()).try_init()?;
    } else if config.pretty_print {
        registry.with(layer.pretty()).try_init()?;
    } else {
        registry.with(layer).try_init()?;
    }

    let mut init_msg = json!({
        "message": "Structured logging initialized",
        "level": config.level,
        "format": if config.json_format { "json" } else { "text" },
    });
    for (key, value) in config.global_fields {
        init_msg[key] = value;
    }
    tracing::debug!(target: "formflow::logging", "{}", init_msg);

    Ok(())
}
