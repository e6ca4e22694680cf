//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod types;

pub use types::{EngineConfig, ListenerConfig, LoggingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub listener: ListenerConfig,
    /// Mapping engine timings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.engine.sequence_timeout_ms == 0 {
            anyhow::bail!("sequence_timeout_ms must be greater than zero");
        }
        if self.engine.single_key_delay_ms == 0 {
            anyhow::bail!("single_key_delay_ms must be greater than zero");
        }
        if self.engine.history_cap == 0 {
            anyhow::bail!("history_cap must be greater than zero");
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, mappings: Option<PathBuf>) -> Self {
        if let Some(path) = mappings {
            self.listener.mappings_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.sequence_timeout_ms, 500);
        assert_eq!(config.engine.single_key_delay_ms, 300);
        assert_eq!(config.engine.history_cap, 20);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[engine]
single_key_delay_ms = 250
"#,
        )
        .unwrap();
        assert_eq!(config.engine.single_key_delay_ms, 250);
        assert_eq!(config.engine.sequence_timeout_ms, 500);
    }

    #[test]
    fn test_validation_rejects_zero_delay() {
        let mut config = Config::default();
        config.engine.single_key_delay_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_overrides_replaces_mappings_path() {
        let config =
            Config::default().with_overrides(Some(PathBuf::from("/tmp/custom-mappings.toml")));
        assert_eq!(
            config.listener.mappings_path,
            PathBuf::from("/tmp/custom-mappings.toml")
        );
    }
}
