//! Mock bridge for testing without a real platform
//!
//! Each capability can be scripted to succeed or fail independently, side
//! effects (haptic pulses, notifications, clipboard writes) are recorded for
//! assertions, and network-change events can be injected on demand.
//!
//! # Usage
//!
//! ```no_run
//! use devdash_bridge::mock::MockBridge;
//! use devdash_bridge::RawNetworkStatus;
//!
//! let mock = MockBridge::new();
//! mock.set_fail_device(true);
//! mock.emit_network(RawNetworkStatus { connected: true, connection_type: "wifi".into() });
//! let _bridge = mock.bridge();
//! ```

use crate::device::{BatteryInfo, DeviceInfo};
use crate::{
    Bridge, BridgeError, ClipboardCapability, DeviceCapability, HapticsCapability, ImpactStyle,
    LocalNotification, NetworkCapability, NetworkSubscription, NotificationCapability,
    RawNetworkStatus, Result,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tokio::sync::mpsc::UnboundedSender;

/// Scriptable state shared between the mock and the test driving it.
#[derive(Debug, Clone)]
pub struct MockState {
    pub device: DeviceInfo,
    pub battery: BatteryInfo,
    pub network: RawNetworkStatus,

    pub fail_device: bool,
    pub fail_battery: bool,
    pub fail_network: bool,
    pub fail_subscribe: bool,
    pub fail_haptics: bool,
    pub fail_notifications: bool,
    pub fail_clipboard: bool,

    /// Recorded haptic pulses, in call order.
    pub impacts: Vec<ImpactStyle>,
    /// Recorded notifications, in call order.
    pub notifications: Vec<LocalNotification>,
    /// Last clipboard write.
    pub clipboard: Option<String>,
}

impl MockState {
    pub fn new() -> Self {
        Self {
            device: DeviceInfo {
                model: "Mock Device".to_string(),
                platform: "mock".to_string(),
                operating_system: "MockOS".to_string(),
                os_version: "1.0".to_string(),
                manufacturer: "Mockers Inc".to_string(),
                is_virtual: true,
            },
            battery: BatteryInfo {
                level: 0.8,
                charging: false,
            },
            network: RawNetworkStatus {
                connected: true,
                connection_type: "wifi".to_string(),
            },
            fail_device: false,
            fail_battery: false,
            fail_network: false,
            fail_subscribe: false,
            fail_haptics: false,
            fail_notifications: false,
            fail_clipboard: false,
            impacts: Vec::new(),
            notifications: Vec::new(),
            clipboard: None,
        }
    }

    /// Flip every capability to failing, as if the whole platform vanished.
    pub fn fail_everything(&mut self) {
        self.fail_device = true;
        self.fail_battery = true;
        self.fail_network = true;
        self.fail_subscribe = true;
        self.fail_haptics = true;
        self.fail_notifications = true;
        self.fail_clipboard = true;
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock implementation of every capability.
pub struct MockBridge {
    state: Arc<RwLock<MockState>>,
    net_events: broadcast::Sender<RawNetworkStatus>,
}

impl MockBridge {
    pub fn new() -> Arc<Self> {
        let (net_events, _) = broadcast::channel(16);
        Arc::new(Self {
            state: Arc::new(RwLock::new(MockState::new())),
            net_events,
        })
    }

    /// Mock with every capability failing from the start.
    pub fn failing() -> Arc<Self> {
        let mock = Self::new();
        if let Ok(mut state) = mock.state.write() {
            state.fail_everything();
        }
        mock
    }

    /// Assemble a [`Bridge`] backed by this mock.
    pub fn bridge(self: &Arc<Self>) -> Bridge {
        Bridge {
            device: self.clone(),
            network: self.clone(),
            haptics: self.clone(),
            notifications: self.clone(),
            clipboard: self.clone(),
        }
    }

    /// Shared state for scripting and assertions.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        Arc::clone(&self.state)
    }

    pub fn set_fail_device(&self, fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.fail_device = fail;
            state.fail_battery = fail;
        }
    }

    pub fn set_fail_network(&self, fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.fail_network = fail;
            state.fail_subscribe = fail;
        }
    }

    pub fn set_battery(&self, level: f32, charging: bool) {
        if let Ok(mut state) = self.state.write() {
            state.battery = BatteryInfo { level, charging };
        }
    }

    pub fn set_network(&self, connected: bool, connection_type: &str) {
        if let Ok(mut state) = self.state.write() {
            state.network = RawNetworkStatus {
                connected,
                connection_type: connection_type.to_string(),
            };
        }
    }

    /// Inject a network-change event into every live subscription.
    pub fn emit_network(&self, status: RawNetworkStatus) {
        if let Ok(mut state) = self.state.write() {
            state.network = status.clone();
        }
        let _ = self.net_events.send(status);
    }

    /// Number of live subscriptions, for single-subscription assertions.
    pub fn live_subscriptions(&self) -> usize {
        self.net_events.receiver_count()
    }

    pub fn recorded_impacts(&self) -> Vec<ImpactStyle> {
        self.state.read().map(|s| s.impacts.clone()).unwrap_or_default()
    }

    pub fn clipboard_contents(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.clipboard.clone())
    }
}

fn unavailable(what: &str) -> BridgeError {
    BridgeError::Unavailable(format!("mock {} failure", what))
}

#[async_trait]
impl DeviceCapability for MockBridge {
    async fn get_info(&self) -> Result<DeviceInfo> {
        let state = self.state.read().map_err(|_| unavailable("lock"))?;
        if state.fail_device {
            return Err(unavailable("device"));
        }
        tracing::debug!("[MOCK] get_info -> {}", state.device.model);
        Ok(state.device.clone())
    }

    async fn get_battery_info(&self) -> Result<BatteryInfo> {
        let state = self.state.read().map_err(|_| unavailable("lock"))?;
        if state.fail_battery {
            return Err(unavailable("battery"));
        }
        Ok(state.battery)
    }
}

#[async_trait]
impl NetworkCapability for MockBridge {
    async fn get_status(&self) -> Result<RawNetworkStatus> {
        let state = self.state.read().map_err(|_| unavailable("lock"))?;
        if state.fail_network {
            return Err(unavailable("network"));
        }
        Ok(state.network.clone())
    }

    async fn subscribe(
        &self,
        events: UnboundedSender<RawNetworkStatus>,
    ) -> Result<NetworkSubscription> {
        {
            let state = self.state.read().map_err(|_| unavailable("lock"))?;
            if state.fail_subscribe {
                return Err(unavailable("subscribe"));
            }
        }

        let mut feed = self.net_events.subscribe();
        let task = tokio::spawn(async move {
            while let Ok(status) = feed.recv().await {
                if events.send(status).is_err() {
                    break;
                }
            }
        });
        tracing::debug!("[MOCK] network subscription installed");
        Ok(NetworkSubscription::new(task))
    }
}

#[async_trait]
impl HapticsCapability for MockBridge {
    async fn impact(&self, style: ImpactStyle) -> Result<()> {
        let mut state = self.state.write().map_err(|_| unavailable("lock"))?;
        if state.fail_haptics {
            return Err(unavailable("haptics"));
        }
        tracing::debug!("[MOCK] haptic impact {}", style.as_str());
        state.impacts.push(style);
        Ok(())
    }
}

#[async_trait]
impl NotificationCapability for MockBridge {
    async fn request_permission(&self) -> Result<()> {
        let state = self.state.read().map_err(|_| unavailable("lock"))?;
        if state.fail_notifications {
            return Err(unavailable("notification permission"));
        }
        Ok(())
    }

    async fn schedule(&self, notification: LocalNotification) -> Result<()> {
        let mut state = self.state.write().map_err(|_| unavailable("lock"))?;
        if state.fail_notifications {
            return Err(unavailable("notifications"));
        }
        tracing::debug!("[MOCK] notification scheduled: {}", notification.title);
        state.notifications.push(notification);
        Ok(())
    }
}

#[async_trait]
impl ClipboardCapability for MockBridge {
    async fn write(&self, text: &str) -> Result<()> {
        let mut state = self.state.write().map_err(|_| unavailable("lock"))?;
        if state.fail_clipboard {
            return Err(unavailable("clipboard"));
        }
        state.clipboard = Some(text.to_string());
        Ok(())
    }
}
