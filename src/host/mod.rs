//! # Host Module
//!
//! The device the recorder observes, seen through read-only oracles plus a
//! notification dispatcher.
//!
//! This module handles:
//! - Oracle traits for settings, storage, processes, location, network,
//!   bluetooth and device identity
//! - The closed set of host notifications
//! - Routing notifications to registered subscribers
//! - A `sysinfo` backed free-space probe

pub mod dispatcher;
pub mod notification;
pub mod oracle;
pub mod storage;

#[cfg(test)]
pub mod mocks;

use std::sync::Arc;

pub use dispatcher::{NotificationDispatcher, SubscriptionId};
pub use notification::{Notification, NotificationKind};
pub use oracle::{
    BluetoothStatus, DeviceIdentity, DisplaySettings, LocationStatus, NetworkStatus,
    ProcessInspector, StorageProbe,
};
pub use storage::SysinfoStorageProbe;

/// Every host collaborator a session consumes
#[derive(Clone)]
pub struct Host {
    pub display: Arc<dyn DisplaySettings>,
    pub storage: Arc<dyn StorageProbe>,
    pub processes: Arc<dyn ProcessInspector>,
    pub location: Arc<dyn LocationStatus>,
    pub network: Arc<dyn NetworkStatus>,
    pub bluetooth: Arc<dyn BluetoothStatus>,
    pub device: Arc<dyn DeviceIdentity>,
    pub notifications: Arc<NotificationDispatcher>,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("notifications", &self.notifications)
            .finish_non_exhaustive()
    }
}
