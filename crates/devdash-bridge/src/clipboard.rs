//! Clipboard capability

use crate::Result;
use async_trait::async_trait;

/// System clipboard writes.
#[async_trait]
pub trait ClipboardCapability: Send + Sync {
    /// Write `text` to the system clipboard.
    async fn write(&self, text: &str) -> Result<()>;
}
