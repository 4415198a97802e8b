//! Scriptable in-memory host for session and monitor tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use super::oracle::*;
use super::{Host, NotificationDispatcher};

#[derive(Debug, Clone)]
struct FakeState {
    brightness: Option<i32>,
    timeout_ms: Option<i64>,
    orientation: Orientation,
    free_kb: Option<u64>,
    recent_task: Option<String>,
    processes: Vec<ProcessInfo>,
    gps_provider: ProviderStatus,
    network_provider: ProviderStatus,
    active_network_type: Option<i32>,
    wifi_connection: Option<WifiConnection>,
    telephony_type: i32,
    ip_address: Option<String>,
    adapter_state: AdapterState,
    bonded_devices: usize,
    details: DeviceDetails,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            brightness: Some(120),
            timeout_ms: Some(30_000),
            orientation: Orientation::Portrait,
            free_kb: Some(1_000_000),
            recent_task: Some("com.android.launcher".to_string()),
            processes: Vec::new(),
            gps_provider: ProviderStatus::Disabled,
            network_provider: ProviderStatus::Missing,
            active_network_type: Some(NETWORK_TYPE_WIFI),
            wifi_connection: None,
            telephony_type: TELEPHONY_TYPE_LTE,
            ip_address: Some("10.0.0.2".to_string()),
            adapter_state: AdapterState::Off,
            bonded_devices: 0,
            details: DeviceDetails {
                package_name: "com.example.tracer".to_string(),
                model: "Pixel 7".to_string(),
                manufacturer: "Google".to_string(),
                os_name: "android".to_string(),
                os_version: "14".to_string(),
                app_version: "2.1.0".to_string(),
            },
        }
    }
}

/// Host whose every reading can be changed between ticks
#[derive(Debug, Default)]
pub struct FakeHost {
    state: Mutex<FakeState>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl FakeHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Bundle this fake as every host collaborator
    pub fn host(self: &Arc<Self>) -> Host {
        Host {
            display: self.clone(),
            storage: self.clone(),
            processes: self.clone(),
            location: self.clone(),
            network: self.clone(),
            bluetooth: self.clone(),
            device: self.clone(),
            notifications: Arc::clone(&self.dispatcher),
        }
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn set_brightness(&self, raw: Option<i32>) {
        self.with(|s| s.brightness = raw);
    }

    pub fn set_timeout_ms(&self, timeout_ms: Option<i64>) {
        self.with(|s| s.timeout_ms = timeout_ms);
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.with(|s| s.orientation = orientation);
    }

    pub fn set_free_kb(&self, free_kb: Option<u64>) {
        self.with(|s| s.free_kb = free_kb);
    }

    pub fn set_recent_task(&self, task: Option<&str>) {
        self.with(|s| s.recent_task = task.map(str::to_string));
    }

    pub fn set_processes(&self, processes: Vec<ProcessInfo>) {
        self.with(|s| s.processes = processes);
    }

    pub fn set_gps_provider(&self, status: ProviderStatus) {
        self.with(|s| s.gps_provider = status);
    }

    pub fn set_network_provider(&self, status: ProviderStatus) {
        self.with(|s| s.network_provider = status);
    }

    pub fn set_active_network_type(&self, network_type: Option<i32>) {
        self.with(|s| s.active_network_type = network_type);
    }

    pub fn set_wifi_connection(&self, connection: Option<WifiConnection>) {
        self.with(|s| s.wifi_connection = connection);
    }

    pub fn set_telephony_type(&self, network_type: i32) {
        self.with(|s| s.telephony_type = network_type);
    }

    pub fn set_ip_address(&self, ip: Option<&str>) {
        self.with(|s| s.ip_address = ip.map(str::to_string));
    }

    pub fn set_adapter_state(&self, state: AdapterState) {
        self.with(|s| s.adapter_state = state);
    }

    pub fn set_bonded_devices(&self, count: usize) {
        self.with(|s| s.bonded_devices = count);
    }
}

impl DisplaySettings for FakeHost {
    fn brightness(&self) -> anyhow::Result<i32> {
        self.with(|s| s.brightness).ok_or_else(|| anyhow!("brightness setting not found"))
    }

    fn screen_off_timeout_ms(&self) -> anyhow::Result<i64> {
        self.with(|s| s.timeout_ms).ok_or_else(|| anyhow!("timeout setting not found"))
    }

    fn orientation(&self) -> Orientation {
        self.with(|s| s.orientation)
    }
}

impl StorageProbe for FakeHost {
    fn free_kb(&self, _path: &Path) -> anyhow::Result<u64> {
        self.with(|s| s.free_kb).ok_or_else(|| anyhow!("storage statistics unavailable"))
    }
}

impl ProcessInspector for FakeHost {
    fn recent_task(&self) -> Option<String> {
        self.with(|s| s.recent_task.clone())
    }

    fn running_processes(&self) -> Vec<ProcessInfo> {
        self.with(|s| s.processes.clone())
    }
}

impl LocationStatus for FakeHost {
    fn gps_provider(&self) -> ProviderStatus {
        self.with(|s| s.gps_provider)
    }

    fn network_provider(&self) -> ProviderStatus {
        self.with(|s| s.network_provider)
    }
}

impl NetworkStatus for FakeHost {
    fn active_network_type(&self) -> Option<i32> {
        self.with(|s| s.active_network_type)
    }

    fn wifi_connection(&self) -> Option<WifiConnection> {
        self.with(|s| s.wifi_connection.clone())
    }

    fn telephony_network_type(&self) -> i32 {
        self.with(|s| s.telephony_type)
    }

    fn local_ip_address(&self) -> Option<String> {
        self.with(|s| s.ip_address.clone())
    }
}

impl BluetoothStatus for FakeHost {
    fn adapter_state(&self) -> AdapterState {
        self.with(|s| s.adapter_state)
    }

    fn bonded_device_count(&self) -> usize {
        self.with(|s| s.bonded_devices)
    }
}

impl DeviceIdentity for FakeHost {
    fn details(&self) -> DeviceDetails {
        self.with(|s| s.details.clone())
    }
}
