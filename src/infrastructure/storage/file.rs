//! JSON file-backed key-value store

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use tracing::debug;

use crate::domain::storage::KeyValueStore;
use crate::domain::DomainError;

/// Store that keeps every key in a single JSON object on disk
///
/// The whole file is read once at open and rewritten on every change.
/// Writes go through a sibling temp file and a rename so a crash never
/// leaves a half-written document behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Opens the store at `path`; a missing file means an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let entries = Self::read_file(&path)?;

        debug!(path = %path.display(), keys = entries.len(), "Opened JSON file store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<BTreeMap<String, Value>, DomainError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let data = fs::read_to_string(path).map_err(|e| {
            DomainError::storage(format!("Failed to read {}: {}", path.display(), e))
        })?;

        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&data).map_err(|e| {
            DomainError::storage(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn write_file(&self, entries: &BTreeMap<String, Value>) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    DomainError::storage(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| DomainError::storage(format!("Failed to serialize store: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data).map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            DomainError::storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })
    }
}

fn poisoned(e: impl std::fmt::Display) -> DomainError {
    DomainError::storage(format!("Store lock poisoned: {}", e))
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).map(Value::to_string))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let value: Value = serde_json::from_str(value)
            .map_err(|e| DomainError::storage(format!("Value for '{}' is not JSON: {}", key, e)))?;

        let mut entries = self.entries.write().map_err(poisoned)?;
        let previous = entries.insert(key.to_string(), value);

        if let Err(e) = self.write_file(&entries) {
            // Keep memory and disk in agreement when the write fails
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().map_err(poisoned)?;

        let Some(previous) = entries.remove(key) else {
            return Ok(false);
        };

        if let Err(e) = self.write_file(&entries) {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }

        Ok(true)
    }
}
