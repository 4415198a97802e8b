//! Screen rotation subscriber: configuration changes become `landscape` or
//! `portrait`.

use std::sync::Arc;

use tracing::debug;

use crate::host::oracle::Orientation;
use crate::host::{DisplaySettings, Notification, NotificationKind};
use crate::trace::payload::{LANDSCAPE, PORTRAIT};
use crate::trace::ChannelSink;

use super::Subscriber;

pub struct RotationSubscriber {
    display: Arc<dyn DisplaySettings>,
    sink: Arc<ChannelSink>,
}

impl RotationSubscriber {
    pub fn new(display: Arc<dyn DisplaySettings>, sink: Arc<ChannelSink>) -> Self {
        Self { display, sink }
    }
}

impl Subscriber for RotationSubscriber {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::Configuration]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::ConfigurationChanged => match self.display.orientation() {
                Orientation::Landscape => self.sink.record(LANDSCAPE),
                Orientation::Portrait => self.sink.record(PORTRAIT),
                Orientation::Undefined => debug!("Orientation undefined, nothing written"),
            },
            other => debug!("rotation ignoring {:?}", other.kind()),
        }
    }
}
