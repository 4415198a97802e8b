//! Bluetooth subscriber and the session-start adapter snapshot.
//!
//! Adapter and bond changes collapse to `CONNECTED` / `DISCONNECTED`, plus
//! `OFF` when the adapter powers down. The bonded-device count only matters
//! for the session-start snapshot; an adapter that turns on mid-session is
//! recorded as disconnected until a bond change says otherwise.

use std::sync::Arc;

use tracing::debug;

use crate::host::oracle::AdapterState;
use crate::host::{BluetoothStatus, Notification, NotificationKind};
use crate::trace::payload::{CONNECTED, DISCONNECTED, OFF};
use crate::trace::ChannelSink;

use super::Subscriber;

/// Token describing the adapter, `None` while it is switching
pub fn adapter_token(state: AdapterState, bonded_devices: usize) -> Option<&'static str> {
    match state {
        AdapterState::Off => Some(OFF),
        AdapterState::On if bonded_devices > 0 => Some(CONNECTED),
        AdapterState::On => Some(DISCONNECTED),
        AdapterState::TurningOn | AdapterState::TurningOff => None,
    }
}

pub struct BluetoothSubscriber {
    bluetooth: Arc<dyn BluetoothStatus>,
    sink: Arc<ChannelSink>,
}

impl BluetoothSubscriber {
    pub fn new(bluetooth: Arc<dyn BluetoothStatus>, sink: Arc<ChannelSink>) -> Self {
        Self { bluetooth, sink }
    }

    /// Write the current adapter state; used once at session start
    pub fn record_current_state(&self) {
        let state = self.bluetooth.adapter_state();
        match adapter_token(state, self.bluetooth.bonded_device_count()) {
            Some(token) => self.sink.record(token),
            None => debug!("Bluetooth adapter is {:?}, no initial state written", state),
        }
    }
}

impl Subscriber for BluetoothSubscriber {
    fn name(&self) -> &'static str {
        "bluetooth"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::Bluetooth]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::BluetoothAdapterChanged => match self.bluetooth.adapter_state() {
                AdapterState::On => self.sink.record(DISCONNECTED),
                AdapterState::Off => self.sink.record(OFF),
                state => debug!("Bluetooth adapter is {:?}", state),
            },
            Notification::BluetoothDeviceChanged { bonded } => {
                self.sink.record(if *bonded { CONNECTED } else { DISCONNECTED });
            }
            other => debug!("bluetooth ignoring {:?}", other.kind()),
        }
    }
}
