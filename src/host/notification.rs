//! # Host Notifications
//!
//! Asynchronous state-change notifications delivered by the host. Each
//! variant is one recognized host action; anything else arrives as
//! [`Notification::Unrecognized`] and is ignored by every subscriber.

/// Notification category a subscriber can register interest in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Battery,
    Wifi,
    Bluetooth,
    Connectivity,
    Screen,
    Configuration,
    SignalStrength,
    GpsStatus,
    Other,
}

/// One host notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    BatteryChanged(BatteryReport),
    WifiRadioChanged(WifiRadioState),
    WifiNetworkChanged(NetworkState),
    BluetoothAdapterChanged,
    BluetoothDeviceChanged { bonded: bool },
    ConnectivityChanged(ActiveNetwork),
    ScreenOn,
    ScreenOff,
    ConfigurationChanged,
    SignalStrengthChanged(SignalStrength),
    GpsStarted,
    GpsStopped,
    Unrecognized(String),
}

impl Notification {
    /// Category used to route the notification to interested subscribers
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::BatteryChanged(_) => NotificationKind::Battery,
            Notification::WifiRadioChanged(_) | Notification::WifiNetworkChanged(_) => {
                NotificationKind::Wifi
            }
            Notification::BluetoothAdapterChanged | Notification::BluetoothDeviceChanged { .. } => {
                NotificationKind::Bluetooth
            }
            Notification::ConnectivityChanged(_) => NotificationKind::Connectivity,
            Notification::ScreenOn | Notification::ScreenOff => NotificationKind::Screen,
            Notification::ConfigurationChanged => NotificationKind::Configuration,
            Notification::SignalStrengthChanged(_) => NotificationKind::SignalStrength,
            Notification::GpsStarted | Notification::GpsStopped => NotificationKind::GpsStatus,
            Notification::Unrecognized(_) => NotificationKind::Other,
        }
    }
}

/// Battery broadcast payload; absent extras are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatteryReport {
    pub level: Option<i32>,
    pub scale: Option<i32>,
    /// Tenths of a degree Celsius
    pub temperature: Option<i32>,
    pub plugged: Option<PowerSource>,
}

/// What the device is drawing power from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSource {
    Ac,
    Usb,
    Wireless,
    Battery,
}

/// Wifi radio power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiRadioState {
    Disabling,
    Disabled,
    Enabling,
    Enabled,
    Unknown,
}

/// Wifi association state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    Connecting,
    Connected,
    Suspended,
    Disconnecting,
    Disconnected,
    Unknown,
}

/// Active network reported by a connectivity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveNetwork {
    pub network_type: i32,
    /// Whether the mobile data path is still up
    pub data_active: bool,
}

/// Radio signal strength reading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalStrength {
    pub is_gsm: bool,
    /// GSM ASU, 0-31, 99 when unknown
    pub gsm_asu: i32,
    pub cdma_dbm: i32,
    pub evdo_dbm: i32,
    pub lte: LteSignal,
}

/// LTE sub-fields; hosts may not expose every one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LteSignal {
    pub signal_strength: Option<i32>,
    pub rsrp: Option<i32>,
    pub rsrq: Option<i32>,
    pub rssnr: Option<i32>,
    pub cqi: Option<i32>,
}
