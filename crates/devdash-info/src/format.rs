//! Pure display formatting over a [`DeviceSnapshot`]
//!
//! No side effects, no I/O. The app's view layer and the copy-to-clipboard
//! template are both built from these helpers.

use crate::{DeviceSnapshot, NetworkStatus};
use devdash_bridge::BatteryInfo;

/// Coarse battery level bucket, thresholds strict `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryLevelClass {
    High,
    Medium,
    Low,
}

impl BatteryLevelClass {
    pub fn from_level(level: f32) -> Self {
        if level > 0.5 {
            BatteryLevelClass::High
        } else if level > 0.2 {
            BatteryLevelClass::Medium
        } else {
            BatteryLevelClass::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryLevelClass::High => "high",
            BatteryLevelClass::Medium => "medium",
            BatteryLevelClass::Low => "low",
        }
    }
}

/// Battery rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryDisplay {
    pub percent_text: String,
    pub level_class: BatteryLevelClass,
    pub charging_text: &'static str,
}

/// Network rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDisplay {
    pub status_text: &'static str,
    pub type_text: &'static str,
}

/// One label/value row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

impl InfoRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// The four display sections of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoDisplay {
    pub device_rows: Vec<InfoRow>,
    pub battery_rows: Vec<InfoRow>,
    pub network_rows: Vec<InfoRow>,
    pub app_rows: Vec<InfoRow>,
}

pub fn format_battery_info(battery: &BatteryInfo) -> BatteryDisplay {
    let percent = (battery.level.clamp(0.0, 1.0) * 100.0).round() as u8;
    BatteryDisplay {
        percent_text: format!("{}%", percent),
        level_class: BatteryLevelClass::from_level(battery.level),
        charging_text: if battery.charging {
            "充电中"
        } else {
            "未充电"
        },
    }
}

pub fn format_network_info(network: &NetworkStatus) -> NetworkDisplay {
    NetworkDisplay {
        status_text: if network.connected {
            "已连接"
        } else {
            "未连接"
        },
        type_text: network.type_text,
    }
}

pub fn format_info_for_display(snapshot: &DeviceSnapshot) -> InfoDisplay {
    let battery = format_battery_info(&snapshot.battery);
    let network = format_network_info(&snapshot.network);

    InfoDisplay {
        device_rows: vec![
            InfoRow::new("型号", snapshot.model.clone()),
            InfoRow::new("平台", snapshot.platform.clone()),
            InfoRow::new("操作系统", snapshot.operating_system.clone()),
            InfoRow::new("系统版本", snapshot.os_version.clone()),
            InfoRow::new("制造商", snapshot.manufacturer.clone()),
            InfoRow::new("设备类型", if snapshot.is_virtual { "模拟器" } else { "真机" }),
        ],
        battery_rows: vec![
            InfoRow::new("电量", battery.percent_text.clone()),
            InfoRow::new("电量等级", battery.level_class.as_str()),
            InfoRow::new("充电状态", battery.charging_text),
        ],
        network_rows: vec![
            InfoRow::new("连接状态", network.status_text),
            InfoRow::new("连接类型", network.type_text),
        ],
        app_rows: vec![
            InfoRow::new("应用版本", snapshot.app_version.clone()),
            InfoRow::new("运行时间", snapshot.uptime.clone()),
        ],
    }
}

/// Fixed plain-text template used by copy-to-clipboard.
pub fn format_as_text(snapshot: &DeviceSnapshot) -> String {
    let display = format_info_for_display(snapshot);
    let mut out = String::new();

    let sections = [
        ("设备信息", &display.device_rows),
        ("电池信息", &display.battery_rows),
        ("网络信息", &display.network_rows),
        ("应用信息", &display.app_rows),
    ];

    for (title, rows) in sections {
        out.push_str(title);
        out.push('\n');
        for row in rows {
            out.push_str(&format!("{}: {}\n", row.label, row.value));
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}
