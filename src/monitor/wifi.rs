//! # Wifi Subscriber
//!
//! Radio power changes and association changes both land on the wifi channel.
//! On `CONNECTED` the access point details are refreshed from the host, but
//! only while wifi is the active bearer; otherwise the last collected values
//! are repeated.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::host::notification::{NetworkState, WifiRadioState};
use crate::host::oracle::{WifiConnection, NETWORK_TYPE_MOBILE};
use crate::host::{NetworkStatus, Notification, NotificationKind};
use crate::trace::payload::{
    self, CONNECTING, DISCONNECTED, DISCONNECTING, OFF, SUSPENDED, UNKNOWN,
};
use crate::trace::ChannelSink;

use super::Subscriber;

/// Placeholder for access point fields never collected
const NOT_COLLECTED: &str = "unknown";

/// Token written for a radio power change, if any
pub fn radio_state_token(state: WifiRadioState) -> Option<&'static str> {
    match state {
        WifiRadioState::Enabled => Some(DISCONNECTED),
        WifiRadioState::Disabled => Some(OFF),
        _ => None,
    }
}

/// Token for every association state except `Connected`
fn network_state_token(state: NetworkState) -> Option<&'static str> {
    match state {
        NetworkState::Connecting => Some(CONNECTING),
        NetworkState::Disconnecting => Some(DISCONNECTING),
        NetworkState::Disconnected => Some(DISCONNECTED),
        NetworkState::Suspended => Some(SUSPENDED),
        NetworkState::Unknown => Some(UNKNOWN),
        NetworkState::Connected => None,
    }
}

pub struct WifiSubscriber {
    network: Arc<dyn NetworkStatus>,
    sink: Arc<ChannelSink>,
    last_connection: Mutex<WifiConnection>,
}

impl WifiSubscriber {
    pub fn new(network: Arc<dyn NetworkStatus>, sink: Arc<ChannelSink>) -> Self {
        Self {
            network,
            sink,
            last_connection: Mutex::new(WifiConnection {
                bssid: NOT_COLLECTED.to_string(),
                ssid: NOT_COLLECTED.to_string(),
                rssi: 0,
            }),
        }
    }

    fn wifi_is_bearer(&self) -> bool {
        matches!(self.network.active_network_type(), Some(t) if t != NETWORK_TYPE_MOBILE)
    }

    fn last_connection(&self) -> MutexGuard<'_, WifiConnection> {
        self.last_connection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_connected(&self) {
        let mut last = self.last_connection();
        if self.wifi_is_bearer() {
            if let Some(connection) = self.network.wifi_connection() {
                *last = connection;
            } else {
                debug!("Wifi connection details unavailable, reusing last values");
            }
        }

        self.sink
            .record(&payload::wifi_connected(&last.bssid, last.rssi, &last.ssid));
    }
}

impl Subscriber for WifiSubscriber {
    fn name(&self) -> &'static str {
        "wifi"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::Wifi]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::WifiRadioChanged(state) => {
                if let Some(token) = radio_state_token(*state) {
                    self.sink.record(token);
                }
            }
            Notification::WifiNetworkChanged(NetworkState::Connected) => self.record_connected(),
            Notification::WifiNetworkChanged(state) => {
                if let Some(token) = network_state_token(*state) {
                    self.sink.record(token);
                }
            }
            other => debug!("wifi ignoring {:?}", other.kind()),
        }
    }
}
