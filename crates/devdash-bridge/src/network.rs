//! Network capability
//!
//! One-shot status queries plus an asynchronous change subscription. Raw
//! statuses carry the platform's connection-type string verbatim; the
//! wifi/cellular/none/unknown mapping lives in `devdash-info` so queries and
//! change events share one normalization path.

use crate::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Network status as reported by the platform, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNetworkStatus {
    pub connected: bool,
    pub connection_type: String,
}

impl RawNetworkStatus {
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            connection_type: "none".to_string(),
        }
    }
}

/// Handle for an active network-change subscription.
///
/// The event feed stops when the handle is cancelled or dropped, so holding
/// at most one handle is enough to guarantee at most one live subscription.
#[derive(Debug)]
pub struct NetworkSubscription {
    task: JoinHandle<()>,
}

impl NetworkSubscription {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Stop the event feed.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for NetworkSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Network status queries and change events.
#[async_trait]
pub trait NetworkCapability: Send + Sync {
    /// Query current network status.
    async fn get_status(&self) -> Result<RawNetworkStatus>;

    /// Subscribe to status changes. Every change is delivered on `events`
    /// until the returned handle is cancelled or dropped.
    async fn subscribe(
        &self,
        events: UnboundedSender<RawNetworkStatus>,
    ) -> Result<NetworkSubscription>;
}
