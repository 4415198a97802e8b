//! # Host Oracles
//!
//! Read-only views of the device the recorder samples. Implementations live
//! in the host integration; the recorder only queries them and never causes
//! side effects through them.
//!
//! Fallible queries return `anyhow::Result`. A failure means the host could
//! not provide the value this time; monitors log it and carry on.

use std::path::Path;

/// Screen settings and orientation
#[cfg_attr(test, mockall::automock)]
pub trait DisplaySettings: Send + Sync {
    /// Raw brightness, 0-255
    fn brightness(&self) -> anyhow::Result<i32>;

    /// Screen-off timeout in milliseconds
    fn screen_off_timeout_ms(&self) -> anyhow::Result<i64>;

    fn orientation(&self) -> Orientation;
}

/// Free space on the volume holding the trace folder
#[cfg_attr(test, mockall::automock)]
pub trait StorageProbe: Send + Sync {
    fn free_kb(&self, path: &Path) -> anyhow::Result<u64>;
}

/// Recent and running process inspection
#[cfg_attr(test, mockall::automock)]
pub trait ProcessInspector: Send + Sync {
    /// Package name of the most recently launched task
    fn recent_task(&self) -> Option<String>;

    fn running_processes(&self) -> Vec<ProcessInfo>;
}

/// Location provider availability
#[cfg_attr(test, mockall::automock)]
pub trait LocationStatus: Send + Sync {
    fn gps_provider(&self) -> ProviderStatus;

    fn network_provider(&self) -> ProviderStatus;
}

/// Network, radio and addressing state
#[cfg_attr(test, mockall::automock)]
pub trait NetworkStatus: Send + Sync {
    /// Type of the active data network, `None` when no network is active
    fn active_network_type(&self) -> Option<i32>;

    /// Current wifi association details
    fn wifi_connection(&self) -> Option<WifiConnection>;

    /// Telephony network type (e.g. 13 for LTE)
    fn telephony_network_type(&self) -> i32;

    fn local_ip_address(&self) -> Option<String>;
}

/// Bluetooth adapter state
#[cfg_attr(test, mockall::automock)]
pub trait BluetoothStatus: Send + Sync {
    fn adapter_state(&self) -> AdapterState;

    fn bonded_device_count(&self) -> usize;
}

/// Static identity of the device and the collecting application
#[cfg_attr(test, mockall::automock)]
pub trait DeviceIdentity: Send + Sync {
    fn details(&self) -> DeviceDetails;
}

/// Network type reported for mobile data
pub const NETWORK_TYPE_MOBILE: i32 = 0;
/// Network type reported for wifi
pub const NETWORK_TYPE_WIFI: i32 = 1;

/// Telephony network types with dedicated signal readings
pub const TELEPHONY_TYPE_CDMA: i32 = 4;
pub const TELEPHONY_TYPE_EVDO_0: i32 = 5;
pub const TELEPHONY_TYPE_EVDO_A: i32 = 6;
pub const TELEPHONY_TYPE_LTE: i32 = 13;

/// Screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Undefined,
}

/// Process importance as ranked by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Foreground,
    Visible,
    Service,
    Background,
    Empty,
}

/// One running process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub name: String,
    pub importance: Importance,
}

impl ProcessInfo {
    pub fn new(name: &str, importance: Importance) -> Self {
        Self {
            name: name.to_string(),
            importance,
        }
    }
}

/// Availability of one location provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Missing,
    Disabled,
    Enabled,
}

/// Bluetooth adapter power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    Off,
    TurningOn,
    On,
    TurningOff,
}

/// Wifi association details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiConnection {
    pub bssid: String,
    pub ssid: String,
    pub rssi: i32,
}

/// Device and application identity fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetails {
    pub package_name: String,
    pub model: String,
    pub manufacturer: String,
    pub os_name: String,
    pub os_version: String,
    pub app_version: String,
}
