//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenerConfig {
    /// Path of the TOML mapping file
    #[serde(default = "default_mappings_path")]
    pub mappings_path: PathBuf,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            mappings_path: default_mappings_path(),
        }
    }
}

fn default_mappings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mousebind")
        .join("mappings.toml")
}

/// Mapping engine timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Chord window: history entries older than this are pruned (ms)
    #[serde(default = "default_sequence_timeout_ms")]
    pub sequence_timeout_ms: u64,

    /// Single-key deferral before a lone press fires (ms)
    #[serde(default = "default_single_key_delay_ms")]
    pub single_key_delay_ms: u64,

    /// Maximum number of history entries scanned for chord matching
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
}

impl EngineConfig {
    /// Chord window timeout as a [`Duration`]
    pub fn sequence_timeout(&self) -> Duration {
        Duration::from_millis(self.sequence_timeout_ms)
    }

    /// Single-key deferral as a [`Duration`]
    pub fn single_key_delay(&self) -> Duration {
        Duration::from_millis(self.single_key_delay_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sequence_timeout_ms: default_sequence_timeout_ms(),
            single_key_delay_ms: default_single_key_delay_ms(),
            history_cap: default_history_cap(),
        }
    }
}

fn default_sequence_timeout_ms() -> u64 {
    500
}

fn default_single_key_delay_ms() -> u64 {
    300
}

fn default_history_cap() -> usize {
    20
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
