//! Battery subscriber: one `<level> <tempC> <powered>` line per broadcast.

use std::sync::Arc;

use tracing::debug;

use crate::host::notification::{BatteryReport, PowerSource};
use crate::host::{Notification, NotificationKind};
use crate::trace::payload;
use crate::trace::ChannelSink;

use super::Subscriber;

/// Temperature assumed when the broadcast carries none, in tenths of a degree
const MISSING_TEMPERATURE: i32 = -1;

/// Render a battery broadcast
pub fn battery_payload(report: &BatteryReport) -> String {
    let level = payload::battery_level(report.level, report.scale);
    let temp = payload::temperature_celsius(report.temperature.unwrap_or(MISSING_TEMPERATURE));
    let powered = matches!(report.plugged, Some(PowerSource::Ac | PowerSource::Usb));

    payload::battery(level, temp, powered)
}

pub struct BatterySubscriber {
    sink: Arc<ChannelSink>,
}

impl BatterySubscriber {
    pub fn new(sink: Arc<ChannelSink>) -> Self {
        Self { sink }
    }
}

impl Subscriber for BatterySubscriber {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::Battery]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::BatteryChanged(report) => {
                let line = battery_payload(report);
                debug!("Battery changed: {}", line);
                self.sink.record(&line);
            }
            other => debug!("battery ignoring {:?}", other.kind()),
        }
    }
}
