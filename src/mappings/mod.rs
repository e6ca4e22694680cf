//! Mapping Configuration Store
//!
//! File-backed persistence for the ordered list of button mapping
//! records. The store only produces raw records; interpretation (single
//! key vs. chord, skipping malformed entries) happens when the engine
//! builds its mapping table, so one bad record never aborts a load.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, MappingStoreError>;

/// Mapping store error types
#[derive(Error, Debug)]
pub enum MappingStoreError {
    /// Mapping file could not be read or written
    #[error("mapping file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Mapping file is not valid TOML
    #[error("mapping file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Mapping records could not be serialized
    #[error("mapping file serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// One raw mapping record as stored on disk.
///
/// A record either carries a `sequence` (chord of button identities) or a
/// single `key_type`. The action is the shortcut string to execute. All
/// fields are optional at this layer; validation is deferred to the
/// mapping table build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    /// Human-readable mapping name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Single-button identity (e.g. `button_3`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,

    /// Ordered chord of button identities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<String>>,

    /// Shortcut string to execute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MappingFile {
    #[serde(default)]
    buttons: Vec<MappingRecord>,
}

/// File-backed mapping store
#[derive(Debug, Clone)]
pub struct MappingStore {
    path: PathBuf,
}

impl MappingStore {
    /// Create a store backed by the given TOML file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ordered record list.
    ///
    /// A missing file is treated as an empty mapping set, not an error,
    /// so a fresh installation starts cleanly.
    pub fn load(&self) -> Result<Vec<MappingRecord>> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "mapping file not found, using empty mapping set");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: MappingFile = toml::from_str(&content)?;
        debug!(
            path = %self.path.display(),
            records = file.buttons.len(),
            "mapping records loaded"
        );
        Ok(file.buttons)
    }

    /// Persist the ordered record list, replacing the file contents
    pub fn save(&self, records: &[MappingRecord]) -> Result<()> {
        let file = MappingFile {
            buttons: records.to_vec(),
        };
        let content = toml::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), records = records.len(), "mapping records saved");
        Ok(())
    }
}
