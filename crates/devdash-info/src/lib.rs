//! Snapshot normalization and display formatting
//!
//! [`InfoProvider`] sits between the capability bridge and the app: it turns
//! whatever the platform reports into an immutable [`DeviceSnapshot`],
//! substituting documented fallback values whenever a capability is absent or
//! fails. No query here ever surfaces an error to its caller.
//!
//! The [`format`] module holds the pure display helpers (battery level
//! classes, localized network labels, the copy-to-clipboard text template).

pub mod format;
mod provider;
mod snapshot;
mod uptime;

pub use provider::InfoProvider;
pub use snapshot::{ConnectionType, DeviceSnapshot, NetworkStatus};
pub use uptime::{FALLBACK_UPTIME, format_uptime};

/// Build-time application version reported in every snapshot.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
