//! # Camera Activity Poller
//!
//! There is no direct "camera in use" signal, so activity is inferred from
//! process names:
//!
//! 1. The camera counts as on when the most recently launched task name
//!    contains the keyword, or a matching process is foreground.
//! 2. A matching background process forces it off. This check runs last and
//!    wins over step 1.
//!
//! Only transitions are written (`ON` / `OFF`).

use std::sync::Arc;

use tracing::debug;

use crate::host::oracle::{Importance, ProcessInfo};
use crate::host::ProcessInspector;
use crate::trace::payload::{OFF, ON};
use crate::trace::ChannelSink;

use super::{EdgeDetector, Poller};

/// Decide camera activity from a process snapshot
///
/// `keyword` must already be lower-case.
pub fn camera_active(recent_task: Option<&str>, running: &[ProcessInfo], keyword: &str) -> bool {
    let recent_matches = recent_task
        .map(|task| task.to_lowercase().contains(keyword))
        .unwrap_or(false);

    let foreground = running.iter().any(|process| {
        process.importance == Importance::Foreground
            && process.name.to_lowercase().contains(keyword)
    });

    // Sub-processes ("pkg:remote") do not count as the camera app going
    // to the background.
    let background = running.iter().any(|process| {
        let name = process.name.to_lowercase();
        process.importance == Importance::Background && name.contains(keyword) && !name.contains(':')
    });

    (recent_matches || foreground) && !background
}

/// Polls process state and records camera on/off transitions
pub struct CameraPoller {
    processes: Arc<dyn ProcessInspector>,
    sink: Arc<ChannelSink>,
    keyword: String,
    edge: EdgeDetector<bool>,
}

impl CameraPoller {
    pub fn new(processes: Arc<dyn ProcessInspector>, sink: Arc<ChannelSink>, keyword: &str) -> Self {
        Self {
            processes,
            sink,
            keyword: keyword.trim().to_lowercase(),
            edge: EdgeDetector::new(),
        }
    }
}

impl Poller for CameraPoller {
    fn name(&self) -> &'static str {
        "camera"
    }

    fn tick(&mut self) {
        let recent = self.processes.recent_task();
        let running = self.processes.running_processes();
        let on = camera_active(recent.as_deref(), &running, &self.keyword);

        if self.edge.observe(on) {
            debug!("Camera turned {}", if on { "on" } else { "off" });
            self.sink.record(if on { ON } else { OFF });
        }
    }
}
