//! # GPS Monitor
//!
//! Two producers share the GPS channel:
//!
//! - [`GpsPoller`] samples whether location services are enabled and writes
//!   `STANDBY` / `OFF` on transitions.
//! - [`GpsStatusSubscriber`] receives fix start/stop notifications and writes
//!   `ACTIVE` / `STANDBY`.
//!
//! Both belong to the same monitor and share a [`GpsFix`] flag so the poller
//! does not report standby while a fix is running.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::host::oracle::ProviderStatus;
use crate::host::{LocationStatus, Notification, NotificationKind};
use crate::trace::payload::{GPS_ACTIVE, GPS_STANDBY, OFF};
use crate::trace::ChannelSink;

use super::{EdgeDetector, Poller, Subscriber};

/// Whether the GPS engine is currently fixing
#[derive(Debug, Clone, Default)]
pub struct GpsFix(Arc<AtomicBool>);

impl GpsFix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, active: bool) {
        self.0.store(active, Ordering::Release);
    }
}

/// Location services count as enabled when at least one provider exists and
/// every existing provider is enabled
pub fn location_enabled(gps: ProviderStatus, network: ProviderStatus) -> bool {
    let gps_exists = gps != ProviderStatus::Missing;
    let network_exists = network != ProviderStatus::Missing;

    if !gps_exists && !network_exists {
        return false;
    }

    (!gps_exists || gps == ProviderStatus::Enabled)
        && (!network_exists || network == ProviderStatus::Enabled)
}

/// Polls location provider availability
pub struct GpsPoller {
    location: Arc<dyn LocationStatus>,
    sink: Arc<ChannelSink>,
    fix: GpsFix,
    edge: EdgeDetector<bool>,
}

impl GpsPoller {
    pub fn new(location: Arc<dyn LocationStatus>, sink: Arc<ChannelSink>, fix: GpsFix) -> Self {
        Self {
            location,
            sink,
            fix,
            edge: EdgeDetector::new(),
        }
    }
}

impl Poller for GpsPoller {
    fn name(&self) -> &'static str {
        "gps"
    }

    fn tick(&mut self) {
        let enabled = location_enabled(self.location.gps_provider(), self.location.network_provider());
        if !self.edge.observe(enabled) {
            return;
        }

        if enabled {
            debug!("Location services enabled");
            if !self.fix.is_active() {
                self.sink.record(GPS_STANDBY);
            }
        } else {
            debug!("Location services disabled");
            self.sink.record(OFF);
        }
    }
}

/// Records GPS fix start/stop notifications
pub struct GpsStatusSubscriber {
    sink: Arc<ChannelSink>,
    fix: GpsFix,
}

impl GpsStatusSubscriber {
    pub fn new(sink: Arc<ChannelSink>, fix: GpsFix) -> Self {
        Self { sink, fix }
    }
}

impl Subscriber for GpsStatusSubscriber {
    fn name(&self) -> &'static str {
        "gps-status"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::GpsStatus]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::GpsStarted => {
                self.sink.record(GPS_ACTIVE);
                self.fix.set(true);
            }
            Notification::GpsStopped => {
                self.sink.record(GPS_STANDBY);
                self.fix.set(false);
            }
            other => debug!("gps-status ignoring {:?}", other.kind()),
        }
    }
}
