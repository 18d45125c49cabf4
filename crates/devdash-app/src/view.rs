//! Pure view rendering
//!
//! `render_view` maps app state to a [`ViewModel`] with no side effects; a
//! [`Surface`] is the thin adapter that applies a ViewModel to an actual
//! output. The core stays testable without any UI attached.

use crate::controller::Phase;
use devdash_config::Preferences;
use devdash_info::format::{InfoRow, format_info_for_display};
use devdash_info::DeviceSnapshot;

/// One titled group of label/value rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: &'static str,
    pub rows: Vec<InfoRow>,
}

/// Everything a surface needs to draw the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub phase: Phase,
    pub loading: bool,
    pub error: Option<String>,
    pub retry_visible: bool,
    pub sections: Vec<SectionView>,
    pub auto_refresh_label: String,
}

/// Render app state into a ViewModel. Pure and deterministic.
pub fn render_view(
    phase: &Phase,
    snapshot: Option<&DeviceSnapshot>,
    preferences: &Preferences,
) -> ViewModel {
    let mut sections = Vec::new();

    if let (Phase::Ready, Some(snapshot)) = (phase, snapshot) {
        let display = format_info_for_display(snapshot);

        sections.push(SectionView {
            title: "设备信息",
            rows: display.device_rows,
        });
        if preferences.show_battery {
            sections.push(SectionView {
                title: "电池信息",
                rows: display.battery_rows,
            });
        }
        if preferences.show_network {
            sections.push(SectionView {
                title: "网络信息",
                rows: display.network_rows,
            });
        }
        let app_rows = if preferences.show_uptime {
            display.app_rows
        } else {
            display
                .app_rows
                .into_iter()
                .filter(|row| row.label != "运行时间")
                .collect()
        };
        sections.push(SectionView {
            title: "应用信息",
            rows: app_rows,
        });
    }

    let error = match phase {
        Phase::Error(message) => Some(message.clone()),
        _ => None,
    };

    ViewModel {
        phase: phase.clone(),
        loading: matches!(phase, Phase::Loading),
        retry_visible: error.is_some(),
        error,
        sections,
        auto_refresh_label: format!(
            "自动刷新: {}",
            if preferences.auto_refresh { "开" } else { "关" }
        ),
    }
}

/// Thin adapter from ViewModel to an actual output surface.
pub trait Surface: Send {
    /// Replace the whole page with `view`.
    fn apply(&mut self, view: &ViewModel);

    /// Redraw only the uptime text.
    fn update_uptime(&mut self, uptime: &str);

    /// Show a transient message.
    fn toast(&mut self, message: &str);
}

/// Console surface: prints the page to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl ConsoleSurface {
    pub fn new() -> Self {
        Self
    }
}

impl Surface for ConsoleSurface {
    fn apply(&mut self, view: &ViewModel) {
        if view.loading {
            println!("加载中...");
            return;
        }
        if let Some(error) = &view.error {
            println!("出错了: {}", error);
            println!("输入 e 重试");
            return;
        }
        for section in &view.sections {
            println!("== {} ==", section.title);
            for row in &section.rows {
                println!("  {}: {}", row.label, row.value);
            }
        }
        println!("[{}]", view.auto_refresh_label);
    }

    fn update_uptime(&mut self, uptime: &str) {
        println!("  运行时间: {}", uptime);
    }

    fn toast(&mut self, message: &str) {
        println!("* {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_view(preferences: &Preferences) -> ViewModel {
        let snapshot = DeviceSnapshot::fallback();
        render_view(&Phase::Ready, Some(&snapshot), preferences)
    }

    #[test]
    fn test_ready_view_has_four_sections() {
        let view = ready_view(&Preferences::default());
        let titles: Vec<_> = view.sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["设备信息", "电池信息", "网络信息", "应用信息"]);
        assert!(!view.retry_visible);
    }

    #[test]
    fn test_preference_flags_hide_sections() {
        let preferences = Preferences {
            show_battery: false,
            show_network: false,
            ..Preferences::default()
        };
        let view = ready_view(&preferences);
        let titles: Vec<_> = view.sections.iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["设备信息", "应用信息"]);
    }

    #[test]
    fn test_show_uptime_off_drops_only_the_uptime_row() {
        let preferences = Preferences {
            show_uptime: false,
            ..Preferences::default()
        };
        let view = ready_view(&preferences);
        let app = view.sections.last().unwrap();
        assert!(app.rows.iter().any(|r| r.label == "应用版本"));
        assert!(!app.rows.iter().any(|r| r.label == "运行时间"));
    }

    #[test]
    fn test_error_view_offers_retry_and_no_sections() {
        let view = render_view(
            &Phase::Error("炸了".to_string()),
            None,
            &Preferences::default(),
        );
        assert!(view.retry_visible);
        assert_eq!(view.error.as_deref(), Some("炸了"));
        assert!(view.sections.is_empty());
    }

    #[test]
    fn test_loading_view_replaces_content() {
        let snapshot = DeviceSnapshot::fallback();
        let view = render_view(&Phase::Loading, Some(&snapshot), &Preferences::default());
        assert!(view.loading);
        assert!(view.sections.is_empty());
    }

    #[test]
    fn test_auto_refresh_label_reflects_state() {
        let mut preferences = Preferences::default();
        assert!(ready_view(&preferences).auto_refresh_label.contains("关"));
        preferences.auto_refresh = true;
        assert!(ready_view(&preferences).auto_refresh_label.contains("开"));
    }

    #[test]
    fn test_render_is_pure() {
        let snapshot = DeviceSnapshot::fallback();
        let preferences = Preferences::default();
        assert_eq!(
            render_view(&Phase::Ready, Some(&snapshot), &preferences),
            render_view(&Phase::Ready, Some(&snapshot), &preferences)
        );
    }
}
