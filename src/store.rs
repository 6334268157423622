//! Whole-blob JSON persistence.
//!
//! The store is a small key-value surface over a data directory: each key
//! maps to one JSON file holding the entire serialized collection for
//! that key. There are no partial updates; every mutation rewrites the
//! whole blob, and writes go through a temp file renamed over the target
//! so a crash mid-write never leaves a truncated blob behind.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage key for the serialized dictionary collection
pub const DICTIONARIES_KEY: &str = "dictionaries";

/// Storage key for the serialized translation history
pub const HISTORY_KEY: &str = "translationHistory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Filesystem-level failure (permissions, disk, rename)
    Io(String),
    /// The blob exists but could not be (de)serialized
    Serialization(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "Storage I/O error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Storage serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// File-backed key-value store with whole-blob semantics.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Storage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Read and deserialize the blob stored under `key`.
    ///
    /// A missing blob is `Ok(None)`; an unreadable or corrupt blob is an
    /// error, which callers recover from by seeding defaults.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let path = self.blob_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Serialize `value` and atomically replace the blob under `key`.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::Io(format!(
                "Failed to create data directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        let temp_file = NamedTempFile::new_in(&self.root)
            .map_err(|e| StoreError::Io(format!("Failed to create temp file: {}", e)))?;

        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, value)
                .map_err(|e| StoreError::Serialization(format!("Failed to serialize: {}", e)))?;
            writer
                .flush()
                .map_err(|e| StoreError::Io(format!("Failed to flush temp file: {}", e)))?;
        }

        let path = self.blob_path(key);
        temp_file.persist(&path).map_err(|e| {
            StoreError::Io(format!("Failed to persist '{}': {}", path.display(), e))
        })?;

        Ok(())
    }
}
