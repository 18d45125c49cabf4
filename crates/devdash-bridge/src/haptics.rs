//! Haptics capability
//!
//! Fire-and-forget tactile pulses. Callers treat failures as non-events, so
//! implementations only need to report absence for logging.

use crate::Result;
use async_trait::async_trait;

/// Impact intensity of a haptic pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

impl ImpactStyle {
    /// Platform-facing name
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactStyle::Light => "light",
            ImpactStyle::Medium => "medium",
            ImpactStyle::Heavy => "heavy",
        }
    }
}

/// Haptic pulse dispatch.
#[async_trait]
pub trait HapticsCapability: Send + Sync {
    /// Fire a single pulse of the given intensity.
    async fn impact(&self, style: ImpactStyle) -> Result<()>;
}
