//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::WatchdogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line. `Some` wins over the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub poll_interval_ms: Option<u64>,
    pub log_level: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut WatchdogConfig) {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(interval) = self.poll_interval_ms {
            config.monitor.poll_interval_ms = interval;
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Load the optional config file, apply overrides, then validate the result.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<WatchdogConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => WatchdogConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WatchdogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: WatchdogConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
