//! Linux host bridge
//!
//! Backs the capability traits with what a Linux host actually exposes:
//! battery via `/sys/class/power_supply`, device identity via DMI and
//! `/etc/os-release`, network via `/sys/class/net` operstate (polled for the
//! change subscription), clipboard via `arboard`, notifications via
//! `notify-rust`. Haptics have no host equivalent and report absence.

use crate::device::{BatteryInfo, DeviceInfo};
use crate::{
    Bridge, BridgeError, ClipboardCapability, DeviceCapability, HapticsCapability, ImpactStyle,
    LocalNotification, NetworkCapability, NetworkSubscription, NotificationCapability,
    RawNetworkStatus, Result,
};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// How often the network subscription re-reads operstate.
const NET_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Host bridge configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub power_supply_dir: PathBuf,
    pub net_dir: PathBuf,
    pub dmi_dir: PathBuf,
    pub os_release: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            power_supply_dir: PathBuf::from("/sys/class/power_supply"),
            net_dir: PathBuf::from("/sys/class/net"),
            dmi_dir: PathBuf::from("/sys/devices/virtual/dmi/id"),
            os_release: PathBuf::from("/etc/os-release"),
        }
    }
}

/// Linux host implementation of every capability.
pub struct HostBridge {
    config: HostConfig,
    battery_path: Option<PathBuf>,
}

impl HostBridge {
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    pub fn with_config(config: HostConfig) -> Self {
        let battery_path = detect_battery(&config.power_supply_dir);
        match &battery_path {
            Some(path) => tracing::info!("Found battery at {}", path.display()),
            None => tracing::info!("No battery supply found, battery queries will fail soft"),
        }
        Self {
            config,
            battery_path,
        }
    }

    /// Assemble a [`Bridge`] where every capability is host-backed.
    pub fn into_bridge(self) -> Bridge {
        let inner = Arc::new(self);
        Bridge {
            device: inner.clone(),
            network: inner.clone(),
            haptics: inner.clone(),
            notifications: inner.clone(),
            clipboard: inner,
        }
    }

    fn read_os_name(&self) -> String {
        fs::read_to_string(&self.config.os_release)
            .ok()
            .and_then(|contents| {
                contents.lines().find_map(|line| {
                    line.strip_prefix("NAME=")
                        .map(|v| v.trim_matches('"').to_string())
                })
            })
            .unwrap_or_else(|| "Linux".to_string())
    }

    fn read_current_status(&self) -> RawNetworkStatus {
        read_network_status(&self.config.net_dir)
    }
}

impl Default for HostBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first power supply of type "Battery".
fn detect_battery(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        if let Ok(psu_type) = fs::read_to_string(path.join("type")) {
            if psu_type.trim().eq_ignore_ascii_case("battery") {
                return Some(path);
            }
        }
    }
    None
}

fn read_sysfs_string(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn read_sysfs_int(path: &Path) -> Option<i64> {
    read_sysfs_string(path).and_then(|s| s.parse().ok())
}

/// Classify an interface name the way platform bridges report connection types.
fn classify_interface(name: &str) -> &'static str {
    if name.starts_with("wl") {
        "wifi"
    } else if name.starts_with("wwan") || name.starts_with("rmnet") {
        "cellular"
    } else {
        // Wired and virtual interfaces have no mobile equivalent.
        "unknown"
    }
}

/// Scan `/sys/class/net` for the first non-loopback interface that is up.
fn read_network_status(net_dir: &Path) -> RawNetworkStatus {
    let entries = match fs::read_dir(net_dir) {
        Ok(entries) => entries,
        Err(_) => return RawNetworkStatus::disconnected(),
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name == "lo" {
            continue;
        }
        let operstate = read_sysfs_string(&entry.path().join("operstate"));
        if operstate.as_deref() == Some("up") {
            return RawNetworkStatus {
                connected: true,
                connection_type: classify_interface(&name).to_string(),
            };
        }
    }

    RawNetworkStatus::disconnected()
}

#[async_trait]
impl DeviceCapability for HostBridge {
    async fn get_info(&self) -> Result<DeviceInfo> {
        let model = read_sysfs_string(&self.config.dmi_dir.join("product_name"))
            .filter(|s| !s.is_empty())
            .ok_or(BridgeError::Unsupported("device identity"))?;
        let manufacturer = read_sysfs_string(&self.config.dmi_dir.join("sys_vendor"))
            .unwrap_or_else(|| "Unknown".to_string());
        let os_version = read_sysfs_string(Path::new("/proc/sys/kernel/osrelease"))
            .unwrap_or_else(|| "unknown".to_string());

        let virt_markers = ["qemu", "vmware", "virtualbox", "kvm"];
        let haystack = format!("{} {}", model, manufacturer).to_lowercase();
        let is_virtual = virt_markers.iter().any(|m| haystack.contains(m));

        Ok(DeviceInfo {
            model,
            platform: "linux".to_string(),
            operating_system: self.read_os_name(),
            os_version,
            manufacturer,
            is_virtual,
        })
    }

    async fn get_battery_info(&self) -> Result<BatteryInfo> {
        let path = self
            .battery_path
            .as_ref()
            .ok_or(BridgeError::Unsupported("battery"))?;

        let percentage = read_sysfs_int(&path.join("capacity"))
            .ok_or_else(|| BridgeError::Unavailable("battery capacity unreadable".to_string()))?;
        let status = read_sysfs_string(&path.join("status")).unwrap_or_default();
        let charging = matches!(status.as_str(), "Charging" | "Full");

        Ok(BatteryInfo {
            level: (percentage.clamp(0, 100) as f32) / 100.0,
            charging,
        })
    }
}

#[async_trait]
impl NetworkCapability for HostBridge {
    async fn get_status(&self) -> Result<RawNetworkStatus> {
        if !self.config.net_dir.exists() {
            return Err(BridgeError::Unsupported("network"));
        }
        Ok(self.read_current_status())
    }

    async fn subscribe(
        &self,
        events: UnboundedSender<RawNetworkStatus>,
    ) -> Result<NetworkSubscription> {
        if !self.config.net_dir.exists() {
            return Err(BridgeError::Unsupported("network events"));
        }

        let net_dir = self.config.net_dir.clone();
        let mut last = self.read_current_status();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(NET_POLL_INTERVAL);
            loop {
                interval.tick().await;
                let current = read_network_status(&net_dir);
                if current != last {
                    tracing::debug!(
                        connected = current.connected,
                        connection_type = %current.connection_type,
                        "network status changed"
                    );
                    last = current.clone();
                    if events.send(current).is_err() {
                        break;
                    }
                }
            }
        });

        Ok(NetworkSubscription::new(task))
    }
}

#[async_trait]
impl HapticsCapability for HostBridge {
    async fn impact(&self, _style: ImpactStyle) -> Result<()> {
        Err(BridgeError::Unsupported("haptics"))
    }
}

#[async_trait]
impl NotificationCapability for HostBridge {
    async fn request_permission(&self) -> Result<()> {
        // Desktop notification daemons do not gate on permission.
        Ok(())
    }

    async fn schedule(&self, notification: LocalNotification) -> Result<()> {
        notify_rust::Notification::new()
            .summary(&notification.title)
            .body(&notification.body)
            .show()
            .map(|_| ())
            .map_err(|e| BridgeError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ClipboardCapability for HostBridge {
    async fn write(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| BridgeError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| BridgeError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fake_net(dir: &Path, name: &str, operstate: &str) {
        let iface = dir.join(name);
        fs::create_dir_all(&iface).unwrap();
        fs::write(iface.join("operstate"), operstate).unwrap();
    }

    #[test]
    fn test_classify_interface() {
        assert_eq!(classify_interface("wlan0"), "wifi");
        assert_eq!(classify_interface("wlp3s0"), "wifi");
        assert_eq!(classify_interface("wwan0"), "cellular");
        assert_eq!(classify_interface("eth0"), "unknown");
    }

    #[test]
    fn test_network_status_prefers_up_interface() {
        let tmp = TempDir::new().unwrap();
        fake_net(tmp.path(), "lo", "up");
        fake_net(tmp.path(), "wlan0", "up");

        let status = read_network_status(tmp.path());
        assert!(status.connected);
        assert_eq!(status.connection_type, "wifi");
    }

    #[test]
    fn test_network_status_all_down() {
        let tmp = TempDir::new().unwrap();
        fake_net(tmp.path(), "wlan0", "down");

        let status = read_network_status(tmp.path());
        assert!(!status.connected);
        assert_eq!(status.connection_type, "none");
    }

    #[tokio::test]
    async fn test_battery_read_from_sysfs() {
        let tmp = TempDir::new().unwrap();
        let bat = tmp.path().join("BAT0");
        fs::create_dir_all(&bat).unwrap();
        fs::write(bat.join("type"), "Battery\n").unwrap();
        fs::write(bat.join("capacity"), "73\n").unwrap();
        fs::write(bat.join("status"), "Charging\n").unwrap();

        let bridge = HostBridge::with_config(HostConfig {
            power_supply_dir: tmp.path().to_path_buf(),
            ..HostConfig::default()
        });

        let battery = bridge.get_battery_info().await.unwrap();
        assert!((battery.level - 0.73).abs() < f32::EPSILON);
        assert!(battery.charging);
    }

    #[tokio::test]
    async fn test_missing_battery_is_unsupported() {
        let tmp = TempDir::new().unwrap();
        let bridge = HostBridge::with_config(HostConfig {
            power_supply_dir: tmp.path().to_path_buf(),
            ..HostConfig::default()
        });
        assert!(bridge.get_battery_info().await.is_err());
    }
}
