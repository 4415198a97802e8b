//! # Bearer Change Subscriber
//!
//! Watches connectivity changes for the whole session.
//!
//! The first notification only records the active network type as the
//! session baseline. Each later notification raises
//! [`Fault::BearerChanged`] when either holds:
//!
//! - the active type is mobile or wifi and differs from the baseline
//! - the mobile data path is no longer active
//!
//! The fault is not latched; the orchestrator sees every divergent
//! notification. Every connectivity notification also rewrites the
//! device-info and device-details snapshot.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::fault::{Fault, Orchestrator};
use crate::host::notification::ActiveNetwork;
use crate::host::oracle::NETWORK_TYPE_WIFI;
use crate::host::{DeviceIdentity, NetworkStatus, Notification, NotificationKind};
use crate::trace::ChannelSink;

use super::Subscriber;

/// Highest network type that is compared against the baseline (wifi)
const MAX_COMPARED_TYPE: i32 = NETWORK_TYPE_WIFI;

/// Network type written in device details while wifi is the baseline bearer
const WIFI_DETAILS_NETWORK_TYPE: i32 = -1;

/// Whether a connectivity change diverges from the session baseline
pub fn bearer_changed(baseline: i32, active: ActiveNetwork) -> bool {
    let type_changed =
        active.network_type != baseline && active.network_type <= MAX_COMPARED_TYPE;
    type_changed || !active.data_active
}

pub struct BearerSubscriber {
    network: Arc<dyn NetworkStatus>,
    device: Arc<dyn DeviceIdentity>,
    orchestrator: Arc<dyn Orchestrator>,
    info_sink: Arc<ChannelSink>,
    details_sink: Arc<ChannelSink>,
    baseline: Mutex<Option<i32>>,
}

impl BearerSubscriber {
    pub fn new(
        network: Arc<dyn NetworkStatus>,
        device: Arc<dyn DeviceIdentity>,
        orchestrator: Arc<dyn Orchestrator>,
        info_sink: Arc<ChannelSink>,
        details_sink: Arc<ChannelSink>,
    ) -> Self {
        Self {
            network,
            device,
            orchestrator,
            info_sink,
            details_sink,
            baseline: Mutex::new(None),
        }
    }

    /// Session baseline bearer type, once known
    pub fn baseline(&self) -> Option<i32> {
        *self.lock_baseline()
    }

    fn lock_baseline(&self) -> MutexGuard<'_, Option<i32>> {
        self.baseline
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Compare against the baseline, or record it on first use
    ///
    /// Returns the baseline in effect after this notification.
    fn check(&self, active: ActiveNetwork) -> i32 {
        let mut baseline = self.lock_baseline();
        let Some(expected) = *baseline else {
            info!("Session bearer baseline is type {}", active.network_type);
            *baseline = Some(active.network_type);
            return active.network_type;
        };
        drop(baseline);

        if bearer_changed(expected, active) {
            warn!(
                "Bearer changed from type {} to type {} (data active: {})",
                expected, active.network_type, active.data_active
            );
            self.orchestrator.on_fault(Fault::BearerChanged {
                baseline: expected,
                current: active.network_type,
                connected: active.data_active,
            });
        }
        expected
    }

    fn record_device_snapshot(&self, baseline: i32) {
        match self.network.local_ip_address() {
            Some(ip) => self.info_sink.record(&ip),
            None => debug!("Local IP address unavailable"),
        }

        let details = self.device.details();
        let network_type = if baseline == NETWORK_TYPE_WIFI {
            WIFI_DETAILS_NETWORK_TYPE
        } else {
            self.network.telephony_network_type()
        };

        let network_type = network_type.to_string();
        for line in [
            details.package_name.as_str(),
            details.model.as_str(),
            details.manufacturer.as_str(),
            details.os_name.as_str(),
            details.os_version.as_str(),
            details.app_version.as_str(),
            network_type.as_str(),
        ] {
            self.details_sink.record(line);
        }
    }
}

impl Subscriber for BearerSubscriber {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::Connectivity]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::ConnectivityChanged(active) => {
                let baseline = self.check(*active);
                self.record_device_snapshot(baseline);
            }
            other => debug!("bearer ignoring {:?}", other.kind()),
        }
    }
}
