//! Key-value storage backends

use crate::ConfigError;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Flat string key-value storage, the shape platform preference stores expose.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// One file per key inside a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        tracing::debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }
}

/// In-memory storage for tests.
#[derive(Default)]
pub struct MemoryStorage {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. with a corrupt value.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        let _ = storage.set(key, value);
        storage
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.map
            .read()
            .map(|m| m.get(key).cloned())
            .map_err(|_| ConfigError::Storage("poisoned lock".to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.map
            .write()
            .map(|mut m| {
                m.insert(key.to_string(), value.to_string());
            })
            .map_err(|_| ConfigError::Storage("poisoned lock".to_string()))
    }
}
