//! Capability-provider bridge
//!
//! This crate models the platform services DevDash consumes (device identity,
//! battery, network, haptics, local notifications, clipboard) as trait objects
//! selected once at startup. Every capability is optional: implementations
//! signal absence through [`BridgeError::Unsupported`], and callers degrade to
//! documented fallback values instead of failing.
//!
//! # Implementations
//!
//! - [`host`] — Linux host backed by sysfs/procfs, `arboard`, `notify-rust`
//! - [`null`] — every capability absent; exercises all fallback paths
//! - [`mock`] — scriptable backend for tests
//!
//! # Example
//!
//! ```no_run
//! use devdash_bridge::Bridge;
//!
//! # async fn run() {
//! let bridge = Bridge::host();
//! if let Ok(info) = bridge.device.get_info().await {
//!     println!("Running on {}", info.model);
//! }
//! # }
//! ```

pub mod clipboard;
pub mod device;
pub mod haptics;
pub mod host;
pub mod mock;
pub mod network;
pub mod notifications;
pub mod null;

pub use clipboard::ClipboardCapability;
pub use device::{BatteryInfo, DeviceCapability, DeviceInfo};
pub use haptics::{HapticsCapability, ImpactStyle};
pub use network::{NetworkCapability, NetworkSubscription, RawNetworkStatus};
pub use notifications::{LocalNotification, NotificationCapability};

use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("capability not supported: {0}")]
    Unsupported(&'static str),

    #[error("capability unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bridge Result type
pub type Result<T> = std::result::Result<T, BridgeError>;

/// The full set of capability providers, selected once at startup.
///
/// Each field is an independent trait object so tests can mix real and
/// scripted capabilities freely.
#[derive(Clone)]
pub struct Bridge {
    pub device: Arc<dyn DeviceCapability>,
    pub network: Arc<dyn NetworkCapability>,
    pub haptics: Arc<dyn HapticsCapability>,
    pub notifications: Arc<dyn NotificationCapability>,
    pub clipboard: Arc<dyn ClipboardCapability>,
}

impl Bridge {
    /// Bridge backed by the Linux host (sysfs battery, `/sys/class/net`,
    /// desktop clipboard and notifications). Haptics are absent on a host.
    pub fn host() -> Self {
        host::HostBridge::new().into_bridge()
    }

    /// Bridge with every capability absent.
    pub fn null() -> Self {
        null::NullBridge::bridge()
    }
}
