//! Key-value persistence slots.
//!
//! The event store writes its whole state into one slot after every
//! mutation. `FileStorage` keeps each slot as a JSON file on disk,
//! `MemoryStorage` keeps them in process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{CalGridError, CalGridResult};

/// Slot the event store persists itself under.
pub const STORAGE_KEY: &str = "calendar_events";

/// A durable key-value store holding text documents.
pub trait Storage {
    /// Read the slot named `key`, or `None` if it has never been written.
    fn read(&self, key: &str) -> CalGridResult<Option<String>>;

    /// Replace the contents of the slot named `key`.
    fn write(&mut self, key: &str, value: &str) -> CalGridResult<()>;
}

/// Slots stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> CalGridResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CalGridError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> CalGridResult<Option<String>> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            CalGridError::Storage(format!("Could not read {}: {e}", path.display()))
        })?;
        Ok(Some(content))
    }

    fn write(&mut self, key: &str, value: &str) -> CalGridResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CalGridError::Storage(format!("Could not create {}: {e}", self.dir.display()))
        })?;

        // Write to a sibling file first so a crash never leaves a torn slot
        let temp = self.dir.join(format!("{}.json.tmp", key));
        std::fs::write(&temp, value).map_err(|e| {
            CalGridError::Storage(format!("Could not write {}: {e}", temp.display()))
        })?;
        std::fs::rename(&temp, &path).map_err(|e| {
            CalGridError::Storage(format!("Could not replace {}: {e}", path.display()))
        })?;
        Ok(())
    }
}

/// In-process slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> CalGridResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> CalGridResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
