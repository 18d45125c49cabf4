//! DevDash console front end
//!
//! Single-page device dashboard driven by line commands:
//! r = refresh, a = toggle auto-refresh, c = copy all info, h = haptic test,
//! n = notification test, e = retry after an error, q = quit.
//! A one-second tick drives the uptime display independent of refreshes.

use anyhow::Result;
use devdash_app::{AppController, ConsoleSurface};
use devdash_bridge::Bridge;
use devdash_config::{FileStorage, PreferenceStore, default_storage_dir};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let storage_dir = default_storage_dir();
    info!("Storage at {}", storage_dir.display());
    let store = PreferenceStore::new(Arc::new(FileStorage::new(storage_dir)));

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut app = AppController::new(Bridge::host(), store, ConsoleSurface::new(), events_tx);
    app.init().await;

    print_help();

    let mut uptime_tick = tokio::time::interval(Duration::from_secs(1));
    uptime_tick.tick().await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = uptime_tick.tick() => app.update_uptime(),
            Some(event) = events_rx.recv() => app.handle_event(event).await,
            line = lines.next_line() => {
                match line? {
                    Some(command) => {
                        if !run_command(&mut app, command.trim()).await {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    app.destroy();
    Ok(())
}

/// Returns false when the app should quit.
async fn run_command(app: &mut AppController<ConsoleSurface>, command: &str) -> bool {
    match command {
        "r" => app.refresh_info().await,
        "a" => app.toggle_auto_refresh(),
        "c" => app.copy_all_info().await,
        "h" => app.test_haptic().await,
        "n" => app.test_notification().await,
        "e" => app.retry().await,
        "q" => return false,
        "" => {}
        _ => print_help(),
    }
    true
}

fn print_help() {
    println!("[r]刷新 [a]自动刷新 [c]复制 [h]振动 [n]通知 [e]重试 [q]退出");
}

/// Setup logging to console
fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
