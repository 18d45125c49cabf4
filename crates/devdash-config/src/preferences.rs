//! User preferences and the write-once start timestamp

use crate::{ConfigError, Storage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the serialized preferences JSON.
pub const KEY_PREFERENCES: &str = "appPreferences";

/// Storage key for the first-run timestamp (unix millis).
pub const KEY_START_TIME: &str = "appStartTime";

/// User-togglable dashboard preferences, persisted on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub auto_refresh: bool,
    pub refresh_interval_ms: u64,
    pub show_battery: bool,
    pub show_network: bool,
    pub show_uptime: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_refresh: false,
            refresh_interval_ms: 30_000,
            show_battery: true,
            show_network: true,
            show_uptime: true,
        }
    }
}

/// Preference persistence over any [`Storage`] backend.
#[derive(Clone)]
pub struct PreferenceStore {
    storage: Arc<dyn Storage>,
}

impl PreferenceStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Load preferences, defaulting when absent or corrupt. Never fails.
    pub fn load_preferences(&self) -> Preferences {
        let stored = match self.storage.get(KEY_PREFERENCES) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Failed to read preferences, using defaults: {}", e);
                return Preferences::default();
            }
        };

        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Corrupt stored preferences, using defaults: {}", e);
                Preferences::default()
            }),
            None => Preferences::default(),
        }
    }

    /// Persist preferences immediately.
    pub fn save_preferences(&self, preferences: &Preferences) -> Result<(), ConfigError> {
        let json = serde_json::to_string(preferences)?;
        self.storage.set(KEY_PREFERENCES, &json)
    }

    /// Return the stored start timestamp, writing `now_ms` on first run.
    ///
    /// An existing valid value is never overwritten; an unparseable one is
    /// replaced (and logged) so uptime stays computable.
    pub fn ensure_start_time(&self, now_ms: u64) -> Result<u64, ConfigError> {
        if let Some(stored) = self.storage.get(KEY_START_TIME)? {
            match stored.trim().parse::<u64>() {
                Ok(ts) => return Ok(ts),
                Err(_) => {
                    tracing::warn!("Corrupt stored start time {:?}, resetting", stored);
                }
            }
        }

        self.storage.set(KEY_START_TIME, &now_ms.to_string())?;
        tracing::info!("First run, start time set to {}", now_ms);
        Ok(now_ms)
    }
}
