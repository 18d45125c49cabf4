//! InfoProvider: capability queries with graceful degradation

use crate::format;
use crate::snapshot::{DeviceSnapshot, NetworkStatus};
use crate::uptime::format_uptime;
use crate::APP_VERSION;
use devdash_bridge::{
    BatteryInfo, Bridge, DeviceInfo, ImpactStyle, LocalNotification, NetworkSubscription,
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

/// Active network listener: the bridge subscription plus the pump task that
/// normalizes raw events. Both stop when the handle is dropped.
struct ListenerHandle {
    _subscription: NetworkSubscription,
    pump: JoinHandle<()>,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Queries capability providers and normalizes results into snapshots.
///
/// Every query resolves to a documented fallback value on capability absence
/// or failure; from the caller's perspective nothing here can fail.
pub struct InfoProvider {
    bridge: Bridge,
    start_time_ms: u64,
    listener: Option<ListenerHandle>,
}

impl InfoProvider {
    pub fn new(bridge: Bridge, start_time_ms: u64) -> Self {
        Self {
            bridge,
            start_time_ms,
            listener: None,
        }
    }

    /// Query device info and network status concurrently and assemble a
    /// full snapshot. Always succeeds.
    pub async fn get_all_info(&self) -> DeviceSnapshot {
        let (device, network) = tokio::join!(self.get_device_info(), self.get_network_status());
        let (info, battery) = device;

        DeviceSnapshot {
            model: info.model,
            platform: info.platform,
            operating_system: info.operating_system,
            os_version: info.os_version,
            manufacturer: info.manufacturer,
            is_virtual: info.is_virtual,
            battery,
            network,
            app_version: self.app_version().to_string(),
            uptime: self.uptime(),
        }
    }

    /// Query device identity and battery. On any failure of either query the
    /// whole pair falls back to the fixed placeholder record.
    pub async fn get_device_info(&self) -> (DeviceInfo, BatteryInfo) {
        let (info, battery) = tokio::join!(
            self.bridge.device.get_info(),
            self.bridge.device.get_battery_info()
        );

        match (info, battery) {
            (Ok(info), Ok(battery)) => (info, battery),
            (info, battery) => {
                if let Err(e) = &info {
                    tracing::warn!("Device info query failed, using fallback: {}", e);
                }
                if let Err(e) = &battery {
                    tracing::warn!("Battery query failed, using fallback: {}", e);
                }
                let fallback = DeviceSnapshot::fallback();
                (
                    DeviceInfo {
                        model: fallback.model,
                        platform: fallback.platform,
                        operating_system: fallback.operating_system,
                        os_version: fallback.os_version,
                        manufacturer: fallback.manufacturer,
                        is_virtual: fallback.is_virtual,
                    },
                    fallback.battery,
                )
            }
        }
    }

    /// Query network status, falling back to disconnected.
    pub async fn get_network_status(&self) -> NetworkStatus {
        match self.bridge.network.get_status().await {
            Ok(raw) => NetworkStatus::from_raw(&raw),
            Err(e) => {
                tracing::warn!("Network query failed, using fallback: {}", e);
                NetworkStatus::fallback()
            }
        }
    }

    /// Build-time application version.
    pub fn app_version(&self) -> &'static str {
        APP_VERSION
    }

    /// Formatted elapsed time since the persisted start timestamp.
    pub fn uptime(&self) -> String {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(self.start_time_ms);
        self.uptime_at(now_ms)
    }

    /// Deterministic variant of [`uptime`](Self::uptime) for a given clock.
    pub fn uptime_at(&self, now_ms: u64) -> String {
        let elapsed_ms = now_ms.saturating_sub(self.start_time_ms);
        format_uptime(Duration::from_millis(elapsed_ms))
    }

    /// Fire a haptic pulse. Fire-and-forget, failures logged only.
    pub async fn haptic_feedback(&self, style: ImpactStyle) {
        if let Err(e) = self.bridge.haptics.impact(style).await {
            tracing::debug!("Haptic {} unavailable: {}", style.as_str(), e);
        }
    }

    /// Ask for notification permission. Best effort, called once at startup.
    pub async fn request_notification_permission(&self) {
        if let Err(e) = self.bridge.notifications.request_permission().await {
            tracing::debug!("Notification permission unavailable: {}", e);
        }
    }

    /// Schedule an immediate notification with a time-based unique id and the
    /// default sound. Best effort, failures logged only.
    pub async fn send_notification(&self, title: &str, body: &str) {
        let notification = LocalNotification::now(title, body);
        if let Err(e) = self.bridge.notifications.schedule(notification).await {
            tracing::debug!("Notification unavailable: {}", e);
        }
    }

    /// Write to the system clipboard. Returns false on absence or failure.
    pub async fn copy_to_clipboard(&self, text: &str) -> bool {
        match self.bridge.clipboard.write(text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Clipboard write failed: {}", e);
                false
            }
        }
    }

    /// Render the current snapshot into the fixed plain-text template.
    pub fn render_as_text(&self, snapshot: &DeviceSnapshot) -> String {
        format::format_as_text(snapshot)
    }

    /// Subscribe to network changes, delivering normalized statuses on
    /// `events`. Any existing subscription is removed first, so at most one
    /// is ever live. Subscription failure is logged and leaves no listener.
    pub async fn add_network_listener(&mut self, events: UnboundedSender<NetworkStatus>) {
        self.remove_network_listener();

        let (raw_tx, mut raw_rx) = mpsc::unbounded_channel();
        let subscription = match self.bridge.network.subscribe(raw_tx).await {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::warn!("Network listener unavailable: {}", e);
                return;
            }
        };

        let pump = tokio::spawn(async move {
            while let Some(raw) = raw_rx.recv().await {
                if events.send(NetworkStatus::from_raw(&raw)).is_err() {
                    break;
                }
            }
        });

        self.listener = Some(ListenerHandle {
            _subscription: subscription,
            pump,
        });
    }

    /// Remove the network listener if one is installed. No-op otherwise.
    pub fn remove_network_listener(&mut self) {
        if self.listener.take().is_some() {
            tracing::debug!("Network listener removed");
        }
    }

    /// Whether a network listener is currently installed.
    pub fn has_network_listener(&self) -> bool {
        self.listener.is_some()
    }
}
