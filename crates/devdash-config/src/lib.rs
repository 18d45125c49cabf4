//! Preference and start-time persistence for DevDash
//!
//! Small key-value storage behind a [`Storage`] trait so the app core never
//! touches the filesystem directly. Preferences are serialized as JSON under a
//! stable key; a corrupt or missing value falls back to defaults and never
//! fails startup. The start timestamp is written once on first run and drives
//! cross-session uptime.

mod preferences;
mod storage;

pub use preferences::{KEY_PREFERENCES, KEY_START_TIME, PreferenceStore, Preferences};
pub use storage::{FileStorage, MemoryStorage, Storage};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("storage failure: {0}")]
    Storage(String),

    #[error("invalid stored value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default on-disk location for file-backed storage.
pub fn default_storage_dir() -> PathBuf {
    std::env::var_os("DEVDASH_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".devdash")
        })
}
