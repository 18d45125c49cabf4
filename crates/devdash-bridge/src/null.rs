//! Null bridge: every capability absent
//!
//! Selected when no platform backend applies. Every call fails with
//! [`BridgeError::Unsupported`], which callers resolve to their documented
//! fallback values, so a null bridge still produces a fully rendered app.

use crate::{
    Bridge, BridgeError, ClipboardCapability, DeviceCapability, HapticsCapability, ImpactStyle,
    LocalNotification, NetworkCapability, NetworkSubscription, NotificationCapability,
    RawNetworkStatus, Result,
};
use crate::device::{BatteryInfo, DeviceInfo};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Bridge implementation with no backing platform.
pub struct NullBridge;

impl NullBridge {
    /// Assemble a [`Bridge`] where every capability is absent.
    pub fn bridge() -> Bridge {
        let inner = Arc::new(NullBridge);
        Bridge {
            device: inner.clone(),
            network: inner.clone(),
            haptics: inner.clone(),
            notifications: inner.clone(),
            clipboard: inner,
        }
    }
}

#[async_trait]
impl DeviceCapability for NullBridge {
    async fn get_info(&self) -> Result<DeviceInfo> {
        Err(BridgeError::Unsupported("device"))
    }

    async fn get_battery_info(&self) -> Result<BatteryInfo> {
        Err(BridgeError::Unsupported("battery"))
    }
}

#[async_trait]
impl NetworkCapability for NullBridge {
    async fn get_status(&self) -> Result<RawNetworkStatus> {
        Err(BridgeError::Unsupported("network"))
    }

    async fn subscribe(
        &self,
        _events: UnboundedSender<RawNetworkStatus>,
    ) -> Result<NetworkSubscription> {
        Err(BridgeError::Unsupported("network events"))
    }
}

#[async_trait]
impl HapticsCapability for NullBridge {
    async fn impact(&self, _style: ImpactStyle) -> Result<()> {
        Err(BridgeError::Unsupported("haptics"))
    }
}

#[async_trait]
impl NotificationCapability for NullBridge {
    async fn request_permission(&self) -> Result<()> {
        Err(BridgeError::Unsupported("notifications"))
    }

    async fn schedule(&self, _notification: LocalNotification) -> Result<()> {
        Err(BridgeError::Unsupported("notifications"))
    }
}

#[async_trait]
impl ClipboardCapability for NullBridge {
    async fn write(&self, _text: &str) -> Result<()> {
        Err(BridgeError::Unsupported("clipboard"))
    }
}
