//! Integration tests for the app controller lifecycle

use devdash_app::{AppController, AppEvent, Phase, Surface, ViewModel};
use devdash_bridge::RawNetworkStatus;
use devdash_bridge::mock::MockBridge;
use devdash_config::{
    ConfigError, KEY_PREFERENCES, MemoryStorage, PreferenceStore, Preferences, Storage,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Surface that records every applied view and toast for assertions.
#[derive(Clone, Default)]
struct RecordingSurface {
    views: Arc<Mutex<Vec<ViewModel>>>,
    toasts: Arc<Mutex<Vec<String>>>,
    uptime_draws: Arc<Mutex<Vec<String>>>,
}

impl RecordingSurface {
    fn new() -> Self {
        Self::default()
    }

    fn last_view(&self) -> ViewModel {
        self.views.lock().unwrap().last().cloned().expect("no view applied")
    }

    fn toasts(&self) -> Vec<String> {
        self.toasts.lock().unwrap().clone()
    }

    fn uptime_draws(&self) -> Vec<String> {
        self.uptime_draws.lock().unwrap().clone()
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, view: &ViewModel) {
        self.views.lock().unwrap().push(view.clone());
    }

    fn update_uptime(&mut self, uptime: &str) {
        self.uptime_draws.lock().unwrap().push(uptime.to_string());
    }

    fn toast(&mut self, message: &str) {
        self.toasts.lock().unwrap().push(message.to_string());
    }
}

/// Storage whose failure can be toggled mid-test.
struct FlakyStorage {
    fail: AtomicBool,
    inner: MemoryStorage,
}

impl FlakyStorage {
    fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            inner: MemoryStorage::new(),
        }
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl Storage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ConfigError::Storage("storage offline".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ConfigError::Storage("storage offline".to_string()));
        }
        self.inner.set(key, value)
    }
}

struct Harness {
    app: AppController<RecordingSurface>,
    surface: RecordingSurface,
    mock: Arc<MockBridge>,
    events: UnboundedReceiver<AppEvent>,
}

fn harness_with_storage(storage: Arc<dyn Storage>) -> Harness {
    let mock = MockBridge::new();
    let surface = RecordingSurface::new();
    let (events_tx, events) = mpsc::unbounded_channel();
    let app = AppController::new(
        mock.bridge(),
        PreferenceStore::new(storage),
        surface.clone(),
        events_tx,
    );
    Harness {
        app,
        surface,
        mock,
        events,
    }
}

fn harness() -> Harness {
    harness_with_storage(Arc::new(MemoryStorage::new()))
}

#[tokio::test]
async fn test_init_reaches_ready_with_all_sections() {
    let mut h = harness();
    h.app.init().await;

    assert_eq!(*h.app.phase(), Phase::Ready);
    let view = h.surface.last_view();
    assert_eq!(view.sections.len(), 4);
    assert!(!view.retry_visible);
    assert_eq!(h.app.snapshot().unwrap().model, "Mock Device");
}

#[tokio::test]
async fn test_init_with_dead_bridge_is_ready_on_fallbacks() {
    let mock = MockBridge::failing();
    let surface = RecordingSurface::new();
    let (events_tx, _events) = mpsc::unbounded_channel();
    let mut app = AppController::new(
        mock.bridge(),
        PreferenceStore::new(Arc::new(MemoryStorage::new())),
        surface.clone(),
        events_tx,
    );

    app.init().await;

    // Capability failures degrade to fallbacks, they never fail startup.
    assert_eq!(*app.phase(), Phase::Ready);
    let snapshot = app.snapshot().unwrap();
    assert_eq!(snapshot.model, "iPhone");
    assert!(!snapshot.network.connected);
}

#[tokio::test]
async fn test_storage_failure_reaches_error_then_retry_recovers() {
    let storage = Arc::new(FlakyStorage::failing());
    let mut h = harness_with_storage(storage.clone());

    h.app.init().await;
    assert!(matches!(h.app.phase(), Phase::Error(_)));
    let view = h.surface.last_view();
    assert!(view.retry_visible);
    assert!(view.error.is_some());
    assert!(view.sections.is_empty());

    storage.set_fail(false);
    h.app.retry().await;

    assert_eq!(*h.app.phase(), Phase::Ready);
    assert_eq!(h.surface.last_view().sections.len(), 4);
}

#[tokio::test]
async fn test_retry_is_a_noop_outside_error() {
    let mut h = harness();
    h.app.init().await;
    let views_before = h.surface.views.lock().unwrap().len();

    h.app.retry().await;
    assert_eq!(h.surface.views.lock().unwrap().len(), views_before);
}

#[tokio::test]
async fn test_refresh_fires_haptic_and_toast() {
    let mut h = harness();
    h.app.init().await;
    h.mock.set_battery(0.35, false);

    h.app.refresh_info().await;

    assert_eq!(h.app.snapshot().unwrap().battery.level, 0.35);
    assert_eq!(h.mock.recorded_impacts().len(), 1);
    assert!(h.surface.toasts().contains(&"已刷新".to_string()));
}

#[tokio::test]
async fn test_toggle_auto_refresh_persists_and_starts_timer() {
    let storage = Arc::new(MemoryStorage::new());
    let mut h = harness_with_storage(storage.clone());
    h.app.init().await;
    assert!(!h.app.has_auto_refresh());

    h.app.toggle_auto_refresh();
    assert!(h.app.preferences().auto_refresh);
    assert!(h.app.has_auto_refresh());
    let stored = storage.get(KEY_PREFERENCES).unwrap().unwrap();
    assert!(stored.contains("\"autoRefresh\":true"));

    h.app.toggle_auto_refresh();
    assert!(!h.app.preferences().auto_refresh);
    assert!(!h.app.has_auto_refresh());
}

#[tokio::test]
async fn test_double_start_leaves_single_timer() {
    let storage = Arc::new(MemoryStorage::new());
    let store = PreferenceStore::new(storage.clone());
    store
        .save_preferences(&Preferences {
            refresh_interval_ms: 300,
            ..Preferences::default()
        })
        .unwrap();

    let mut h = harness_with_storage(storage);
    h.app.init().await;

    h.app.start_auto_refresh();
    h.app.start_auto_refresh();
    assert!(h.app.has_auto_refresh());

    // A single 300ms timer yields at most two ticks in ~750ms; a leaked
    // duplicate would roughly double that.
    tokio::time::sleep(Duration::from_millis(750)).await;
    h.app.stop_auto_refresh();

    let mut ticks = 0;
    while let Ok(event) = h.events.try_recv() {
        if event == AppEvent::RefreshTick {
            ticks += 1;
        }
    }
    assert!((1..=2).contains(&ticks), "expected 1-2 ticks, got {}", ticks);
}

#[tokio::test]
async fn test_destroy_without_resources_is_safe() {
    let mut h = harness();
    h.app.destroy();
    h.app.destroy();
}

#[tokio::test]
async fn test_destroy_tears_down_timer_and_listener() {
    let mut h = harness();
    h.app.init().await;
    h.app.start_auto_refresh();

    h.app.destroy();

    assert!(!h.app.has_auto_refresh());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(h.mock.live_subscriptions(), 0);
}

#[tokio::test]
async fn test_copy_all_info_success_and_failure_toasts() {
    let mut h = harness();
    h.app.init().await;

    h.app.copy_all_info().await;
    let copied = h.mock.clipboard_contents().unwrap();
    assert!(copied.contains("设备信息"));
    assert!(copied.contains("型号: Mock Device"));
    assert!(h.surface.toasts().contains(&"已复制到剪贴板".to_string()));

    h.mock.state().write().unwrap().fail_clipboard = true;
    h.app.copy_all_info().await;
    assert!(h.surface.toasts().contains(&"复制失败".to_string()));
}

#[tokio::test]
async fn test_network_change_event_patches_snapshot() {
    let mut h = harness();
    h.app.init().await;
    assert!(h.app.snapshot().unwrap().network.connected);

    h.mock.emit_network(RawNetworkStatus {
        connected: false,
        connection_type: "none".to_string(),
    });

    let event = h.events.recv().await.unwrap();
    h.app.handle_event(event).await;

    let network = h.app.snapshot().unwrap().network;
    assert!(!network.connected);
    assert_eq!(network.type_text, "无连接");
}

#[tokio::test]
async fn test_update_uptime_noop_before_init() {
    let mut h = harness();
    h.app.update_uptime();
    assert!(h.surface.uptime_draws().is_empty());
}

#[tokio::test]
async fn test_update_uptime_redraws_only_uptime() {
    let mut h = harness();
    h.app.init().await;
    let views_before = h.surface.views.lock().unwrap().len();

    h.app.update_uptime();

    assert_eq!(h.surface.uptime_draws().len(), 1);
    // No full re-render happened.
    assert_eq!(h.surface.views.lock().unwrap().len(), views_before);
}

#[tokio::test]
async fn test_preferences_survive_a_fresh_session() {
    let tmp = tempfile::TempDir::new().unwrap();
    let prefs = Preferences {
        auto_refresh: true,
        refresh_interval_ms: 5_000,
        show_network: false,
        ..Preferences::default()
    };

    {
        let store =
            PreferenceStore::new(Arc::new(devdash_config::FileStorage::new(tmp.path())));
        store.save_preferences(&prefs).unwrap();
        store.ensure_start_time(1_234).unwrap();
    }

    // Fresh store over the same directory, as a new process would build it.
    let store = PreferenceStore::new(Arc::new(devdash_config::FileStorage::new(tmp.path())));
    assert_eq!(store.load_preferences(), prefs);
    assert_eq!(store.ensure_start_time(9_999).unwrap(), 1_234);
}

#[tokio::test]
async fn test_preferences_loaded_at_startup_drive_auto_refresh() {
    let storage = Arc::new(MemoryStorage::new());
    let store = PreferenceStore::new(storage.clone());
    store
        .save_preferences(&Preferences {
            auto_refresh: true,
            refresh_interval_ms: 60_000,
            ..Preferences::default()
        })
        .unwrap();

    let mut h = harness_with_storage(storage);
    h.app.init().await;

    assert!(h.app.preferences().auto_refresh);
    assert!(h.app.has_auto_refresh());
}
