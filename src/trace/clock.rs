//! Event time source for timestamped trace lines.

use chrono::{DateTime, Utc};

/// Provides the event timestamp written in front of trace lines
///
/// Every channel of a session shares one source so all files use the same
/// time base.
pub trait TimeSource: Send + Sync {
    fn event_timestamp(&self) -> String;
}

/// Wall-clock time source, `<epoch-seconds>.<millis>`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn event_timestamp(&self) -> String {
        format_timestamp(Utc::now())
    }
}

/// Render an instant as fractional epoch seconds with millisecond precision
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    format!("{}.{:03}", at.timestamp(), at.timestamp_subsec_millis())
}
