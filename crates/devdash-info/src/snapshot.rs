//! Normalized snapshot types

use crate::APP_VERSION;
use crate::uptime::FALLBACK_UPTIME;
use devdash_bridge::{BatteryInfo, RawNetworkStatus};

/// Connection type after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Wifi,
    Cellular,
    None,
    Unknown,
}

impl ConnectionType {
    /// Map a platform connection-type string, case-insensitively.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wifi" => ConnectionType::Wifi,
            "cellular" => ConnectionType::Cellular,
            "none" => ConnectionType::None,
            _ => ConnectionType::Unknown,
        }
    }

    /// Localized display label.
    pub fn type_text(&self) -> &'static str {
        match self {
            ConnectionType::Wifi => "Wi-Fi",
            ConnectionType::Cellular => "蜂窝网络",
            ConnectionType::None => "无连接",
            ConnectionType::Unknown => "未知",
        }
    }
}

/// Network state after normalization. Queries and asynchronous change events
/// both go through [`NetworkStatus::from_raw`], so there is exactly one
/// type-to-text mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStatus {
    pub connected: bool,
    pub connection_type: ConnectionType,
    pub type_text: &'static str,
}

impl NetworkStatus {
    pub fn from_raw(raw: &RawNetworkStatus) -> Self {
        let connection_type = ConnectionType::from_raw(&raw.connection_type);
        Self {
            connected: raw.connected,
            connection_type,
            type_text: connection_type.type_text(),
        }
    }

    /// Fallback when the network capability is absent or failing.
    pub fn fallback() -> Self {
        Self {
            connected: false,
            connection_type: ConnectionType::None,
            type_text: ConnectionType::None.type_text(),
        }
    }
}

/// One immutable, fully populated read of device state. Replaced wholesale on
/// each refresh, except that a network-change event may patch `network` alone.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSnapshot {
    pub model: String,
    pub platform: String,
    pub operating_system: String,
    pub os_version: String,
    pub manufacturer: String,
    pub is_virtual: bool,
    pub battery: BatteryInfo,
    pub network: NetworkStatus,
    pub app_version: String,
    pub uptime: String,
}

impl DeviceSnapshot {
    /// Static placeholder snapshot used when nothing can be queried at all.
    pub fn fallback() -> Self {
        Self {
            model: "iPhone".to_string(),
            platform: "ios".to_string(),
            operating_system: "iOS".to_string(),
            os_version: "17.0".to_string(),
            manufacturer: "Apple".to_string(),
            is_virtual: false,
            battery: BatteryInfo {
                level: 1.0,
                charging: false,
            },
            network: NetworkStatus::fallback(),
            app_version: APP_VERSION.to_string(),
            uptime: FALLBACK_UPTIME.to_string(),
        }
    }
}
