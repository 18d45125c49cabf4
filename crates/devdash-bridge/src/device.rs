//! Device and battery capability
//!
//! Identity of the device DevDash runs on plus a point-in-time battery read.
//! The shapes mirror what platform bridges report; normalization into display
//! values happens in `devdash-info`.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Device identity as reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model: String,
    pub platform: String,
    pub operating_system: String,
    pub os_version: String,
    pub manufacturer: String,
    pub is_virtual: bool,
}

/// Battery state. `level` is in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryInfo {
    pub level: f32,
    pub charging: bool,
}

impl Default for BatteryInfo {
    fn default() -> Self {
        Self {
            level: 1.0,
            charging: false,
        }
    }
}

/// Device identity and battery queries.
#[async_trait]
pub trait DeviceCapability: Send + Sync {
    /// Query device identity.
    async fn get_info(&self) -> Result<DeviceInfo>;

    /// Query current battery state.
    async fn get_battery_info(&self) -> Result<BatteryInfo>;
}
