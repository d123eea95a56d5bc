use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value capability the arcade core persists through.
///
/// The core never touches a concrete global store; callers inject a
/// backend, tests inject [`MemoryStorage`]. All reads are fail-soft:
/// a missing or unreadable key is `None`, never an error.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.map.remove(key);
    }
}

/// File-backed backend: one JSON object holding every key.
///
/// Mirrors the browser localStorage model: each write replaces the
/// whole snapshot on disk. A corrupt or missing file loads as empty.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    map: HashMap<String, String>,
}

impl JsonFileStorage {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let map = match Self::load(&path) {
            Ok(map) => map,
            Err(err) => {
                debug!(path = %path.display(), %err, "starting from an empty store");
                HashMap::new()
            }
        };
        Self { path, map }
    }

    fn load(path: &Path) -> Result<HashMap<String, String>, StoreError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.map)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            warn!(path = %self.path.display(), %err, "failed to persist store snapshot");
        }
    }

    fn remove(&mut self, key: &str) {
        if self.map.remove(key).is_some() {
            if let Err(err) = self.flush() {
                warn!(path = %self.path.display(), %err, "failed to persist store snapshot");
            }
        }
    }
}
