//! Local-notification capability

use crate::Result;
use async_trait::async_trait;

/// A local notification to schedule immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
    /// Unique id, time-based at call sites.
    pub id: i64,
    pub title: String,
    pub body: String,
    /// Sound name, `None` for the platform default.
    pub sound: Option<String>,
}

impl LocalNotification {
    /// Notification with a time-based unique id and the default sound.
    pub fn now(title: impl Into<String>, body: impl Into<String>) -> Self {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self {
            id,
            title: title.into(),
            body: body.into(),
            sound: None,
        }
    }
}

/// Local notification scheduling.
#[async_trait]
pub trait NotificationCapability: Send + Sync {
    /// Ask the platform for permission to notify. Called once during startup.
    async fn request_permission(&self) -> Result<()>;

    /// Schedule a notification for immediate delivery.
    async fn schedule(&self, notification: LocalNotification) -> Result<()>;
}
