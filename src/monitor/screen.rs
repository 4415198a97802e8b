//! # Screen Monitor
//!
//! The screen channel is written by a poller that tracks brightness and
//! timeout changes, and by a subscriber for screen on/off transitions. Both
//! share one [`ScreenState`]: every `ON` line becomes the previous value, so
//! a poll right after a screen-on notification does not repeat it. The
//! subscriber always writes.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::host::{DisplaySettings, Notification, NotificationKind};
use crate::trace::payload::{self, OFF};
use crate::trace::ChannelSink;

use super::{EdgeDetector, Poller, Subscriber};

/// Normalized screen settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenSample {
    pub timeout_secs: i64,
    pub brightness_pct: u32,
}

impl ScreenSample {
    fn on_payload(self) -> String {
        payload::screen_on(self.timeout_secs, self.brightness_pct)
    }
}

/// Last screen settings written, shared by the screen poller and subscriber
#[derive(Debug, Clone, Default)]
pub struct ScreenState(Arc<Mutex<EdgeDetector<ScreenSample>>>);

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, EdgeDetector<ScreenSample>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Read and normalize brightness and timeout
///
/// Returns `None` when either setting is unavailable.
pub fn sample_screen(display: &dyn DisplaySettings) -> Option<ScreenSample> {
    let brightness = display
        .brightness()
        .map_err(|e| warn!("Screen brightness unavailable: {:#}", e))
        .ok()?;
    let timeout_ms = display
        .screen_off_timeout_ms()
        .map_err(|e| warn!("Screen timeout unavailable: {:#}", e))
        .ok()?;

    Some(ScreenSample {
        timeout_secs: payload::timeout_seconds(timeout_ms),
        brightness_pct: payload::brightness_percent(brightness),
    })
}

/// Polls screen settings and records changes
pub struct ScreenPoller {
    display: Arc<dyn DisplaySettings>,
    sink: Arc<ChannelSink>,
    state: ScreenState,
}

impl ScreenPoller {
    pub fn new(display: Arc<dyn DisplaySettings>, sink: Arc<ChannelSink>, state: ScreenState) -> Self {
        Self { display, sink, state }
    }
}

impl Poller for ScreenPoller {
    fn name(&self) -> &'static str {
        "screen"
    }

    fn tick(&mut self) {
        let Some(sample) = sample_screen(self.display.as_ref()) else {
            return;
        };

        // Held across the write so a concurrent screen-on line cannot slip
        // between the comparison and the append.
        let mut edge = self.state.lock();
        if edge.observe(sample) {
            debug!("Screen settings changed: {:?}", sample);
            self.sink.record(&sample.on_payload());
        }
    }
}

/// Records screen on/off notifications
pub struct ScreenSubscriber {
    display: Arc<dyn DisplaySettings>,
    sink: Arc<ChannelSink>,
    state: ScreenState,
}

impl ScreenSubscriber {
    pub fn new(display: Arc<dyn DisplaySettings>, sink: Arc<ChannelSink>, state: ScreenState) -> Self {
        Self { display, sink, state }
    }
}

impl Subscriber for ScreenSubscriber {
    fn name(&self) -> &'static str {
        "screen"
    }

    fn interests(&self) -> &'static [NotificationKind] {
        &[NotificationKind::Screen]
    }

    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::ScreenOn => {
                let sample = sample_screen(self.display.as_ref()).unwrap_or_default();
                let mut edge = self.state.lock();
                edge.observe(sample);
                self.sink.record(&sample.on_payload());
            }
            Notification::ScreenOff => self.sink.record(OFF),
            other => debug!("screen ignoring {:?}", other.kind()),
        }
    }
}
