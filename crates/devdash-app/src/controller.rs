//! Application controller
//!
//! Owns all transient app state: the current snapshot, loaded preferences,
//! the auto-refresh timer task and the network-change subscription. The timer
//! and subscription are replaced, never accumulated, so at most one of each
//! is live at any time. `destroy` is the single teardown path and is safe to
//! call with nothing started.

use crate::view::{Surface, render_view};
use devdash_bridge::{Bridge, ImpactStyle};
use devdash_config::{ConfigError, PreferenceStore, Preferences};
use devdash_info::{DeviceSnapshot, InfoProvider, NetworkStatus};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

/// Lower bound on the auto-refresh period, keeps a corrupt preference from
/// spinning the event loop.
const MIN_REFRESH_INTERVAL_MS: u64 = 250;

/// UI lifecycle phase. `Ready` and `Error` both stay interactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
    Error(String),
}

/// Events delivered to the controller through its event channel.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Auto-refresh timer fired.
    RefreshTick,
    /// Normalized network-change event.
    NetworkChanged(NetworkStatus),
}

/// Lifecycle orchestration and UI state machine.
pub struct AppController<S: Surface> {
    bridge: Bridge,
    store: PreferenceStore,
    surface: S,
    events_tx: UnboundedSender<AppEvent>,

    phase: Phase,
    preferences: Preferences,
    provider: Option<InfoProvider>,
    snapshot: Option<DeviceSnapshot>,
    refresh_task: Option<JoinHandle<()>>,
    net_forward_task: Option<JoinHandle<()>>,
}

impl<S: Surface> AppController<S> {
    pub fn new(
        bridge: Bridge,
        store: PreferenceStore,
        surface: S,
        events_tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            bridge,
            store,
            surface,
            events_tx,
            phase: Phase::Uninitialized,
            preferences: Preferences::default(),
            provider: None,
            snapshot: None,
            refresh_task: None,
            net_forward_task: None,
        }
    }

    /// Run the startup sequence. Idempotent: rerunning tears down whatever a
    /// previous run left behind. On failure the loading view is replaced
    /// entirely by the error view with a retry affordance.
    pub async fn init(&mut self) {
        self.phase = Phase::Loading;
        self.render();

        match self.try_init().await {
            Ok(()) => {
                self.phase = Phase::Ready;
                self.render();
                tracing::info!("App ready");
            }
            Err(e) => {
                tracing::error!("Initialization failed: {}", e);
                self.teardown_resources();
                self.snapshot = None;
                self.phase = Phase::Error(format!("初始化失败: {}", e));
                self.render();
            }
        }
    }

    async fn try_init(&mut self) -> Result<(), ConfigError> {
        let now_ms = unix_millis();
        let start_time = self.store.ensure_start_time(now_ms)?;
        self.preferences = self.store.load_preferences();

        let mut provider = InfoProvider::new(self.bridge.clone(), start_time);
        provider.request_notification_permission().await;

        self.snapshot = Some(provider.get_all_info().await);

        // Network changes flow: bridge -> provider (normalization) -> app events.
        let (net_tx, mut net_rx) = mpsc::unbounded_channel();
        provider.add_network_listener(net_tx).await;
        let events = self.events_tx.clone();
        let forward = tokio::spawn(async move {
            while let Some(status) = net_rx.recv().await {
                if events.send(AppEvent::NetworkChanged(status)).is_err() {
                    break;
                }
            }
        });
        if let Some(old) = self.net_forward_task.replace(forward) {
            old.abort();
        }

        self.provider = Some(provider);

        if self.preferences.auto_refresh {
            self.start_auto_refresh();
        }

        Ok(())
    }

    /// Re-enter the startup sequence from the error view.
    pub async fn retry(&mut self) {
        if matches!(self.phase, Phase::Error(_)) {
            self.init().await;
        }
    }

    /// Dispatch an event from the controller's channel.
    pub async fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::RefreshTick => self.refresh_info().await,
            AppEvent::NetworkChanged(status) => self.handle_network_change(status),
        }
    }

    /// Re-fetch the snapshot and redraw. Fires a light haptic first. The
    /// exclusive receiver serializes invocations, so refreshes cannot
    /// interleave within one controller.
    pub async fn refresh_info(&mut self) {
        let Some(provider) = &self.provider else {
            return;
        };
        provider.haptic_feedback(ImpactStyle::Light).await;
        self.snapshot = Some(provider.get_all_info().await);
        self.render();
        self.surface.toast("已刷新");
    }

    /// Flip the auto-refresh preference, persist it, and start or stop the
    /// interval timer to match.
    pub fn toggle_auto_refresh(&mut self) {
        self.preferences.auto_refresh = !self.preferences.auto_refresh;
        if let Err(e) = self.store.save_preferences(&self.preferences) {
            tracing::warn!("Failed to persist preferences: {}", e);
            self.surface.toast("保存设置失败");
        }

        if self.preferences.auto_refresh {
            self.start_auto_refresh();
        } else {
            self.stop_auto_refresh();
        }
        self.render();
    }

    /// Start the interval timer, replacing any prior one.
    pub fn start_auto_refresh(&mut self) {
        self.stop_auto_refresh();

        let period = Duration::from_millis(
            self.preferences.refresh_interval_ms.max(MIN_REFRESH_INTERVAL_MS),
        );
        let events = self.events_tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick of a tokio interval is immediate; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if events.send(AppEvent::RefreshTick).is_err() {
                    break;
                }
            }
        });
        self.refresh_task = Some(task);
        tracing::debug!("Auto-refresh started, period {:?}", period);
    }

    /// Stop the interval timer if one is running.
    pub fn stop_auto_refresh(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
            tracing::debug!("Auto-refresh stopped");
        }
    }

    /// Whether an auto-refresh timer task is currently live.
    pub fn has_auto_refresh(&self) -> bool {
        self.refresh_task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Render the snapshot into the fixed text template and copy it.
    pub async fn copy_all_info(&mut self) {
        let (Some(provider), Some(snapshot)) = (&self.provider, &self.snapshot) else {
            return;
        };
        let text = provider.render_as_text(snapshot);
        if provider.copy_to_clipboard(&text).await {
            self.surface.toast("已复制到剪贴板");
        } else {
            self.surface.toast("复制失败");
        }
    }

    /// Fire a medium test pulse.
    pub async fn test_haptic(&mut self) {
        let Some(provider) = &self.provider else {
            return;
        };
        provider.haptic_feedback(ImpactStyle::Medium).await;
        self.surface.toast("已触发振动");
    }

    /// Send a test notification.
    pub async fn test_notification(&mut self) {
        let Some(provider) = &self.provider else {
            return;
        };
        provider.send_notification("DevDash", "这是一条测试通知").await;
        self.surface.toast("通知已发送");
    }

    /// Recompute and redraw only the uptime text. Driven by an external
    /// one-second tick; a no-op before the first snapshot.
    pub fn update_uptime(&mut self) {
        let Some(provider) = &self.provider else {
            return;
        };
        let Some(snapshot) = &mut self.snapshot else {
            return;
        };
        snapshot.uptime = provider.uptime();
        if self.preferences.show_uptime && self.phase == Phase::Ready {
            self.surface.update_uptime(&snapshot.uptime);
        }
    }

    /// Patch the network field of the current snapshot and redraw. No refetch.
    pub fn handle_network_change(&mut self, status: NetworkStatus) {
        tracing::info!(
            connected = status.connected,
            "Network changed: {}",
            status.type_text
        );
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.network = status;
            self.render();
        }
    }

    /// Stop the timer and remove the network listener. The only cleanup
    /// path; safe to call when neither was ever started, and repeatedly.
    pub fn destroy(&mut self) {
        self.teardown_resources();
        tracing::info!("App destroyed");
    }

    fn teardown_resources(&mut self) {
        self.stop_auto_refresh();
        if let Some(task) = self.net_forward_task.take() {
            task.abort();
        }
        if let Some(provider) = &mut self.provider {
            provider.remove_network_listener();
        }
    }

    fn render(&mut self) {
        let view = render_view(&self.phase, self.snapshot.as_ref(), &self.preferences);
        self.surface.apply(&view);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn snapshot(&self) -> Option<&DeviceSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
