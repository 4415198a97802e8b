//! Active-process snapshot written once at session start.

use tracing::debug;

use crate::host::oracle::Importance;
use crate::host::ProcessInspector;
use crate::trace::payload::{self, IMPORTANCE_BACKGROUND, IMPORTANCE_FOREGROUND};
use crate::trace::ChannelSink;

/// Write one line per foreground or background process
///
/// Returns the number of lines written.
pub fn record_active_processes(processes: &dyn ProcessInspector, sink: &ChannelSink) -> usize {
    let mut written = 0;
    for process in processes.running_processes() {
        let importance = match process.importance {
            Importance::Foreground => IMPORTANCE_FOREGROUND,
            Importance::Background => IMPORTANCE_BACKGROUND,
            _ => continue,
        };
        sink.record(&payload::process_entry(&process.name, importance));
        written += 1;
    }

    debug!("Recorded {} active processes", written);
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::host::oracle::{MockProcessInspector, ProcessInfo};
    use crate::trace::mocks::memory_sink;

    #[test]
    fn test_only_foreground_and_background() {
        let mut inspector = MockProcessInspector::new();
        inspector.expect_running_processes().times(1).returning(|| {
            vec![
                ProcessInfo::new("com.android.systemui", Importance::Foreground),
                ProcessInfo::new("com.android.phone", Importance::Service),
                ProcessInfo::new("com.google.maps", Importance::Background),
                ProcessInfo::new("com.example.widget", Importance::Visible),
                ProcessInfo::new("com.example.cached", Importance::Empty),
            ]
        });
        let (sink, buffer) = memory_sink(Channel::ActiveProcess);

        assert_eq!(record_active_processes(&inspector, &sink), 2);
        assert_eq!(
            buffer.payloads(),
            vec![
                "Name:com.android.systemui State:Foreground",
                "Name:com.google.maps State:Background",
            ]
        );
    }

    #[test]
    fn test_no_processes() {
        let mut inspector = MockProcessInspector::new();
        inspector.expect_running_processes().returning(Vec::new);
        let (sink, buffer) = memory_sink(Channel::ActiveProcess);

        assert_eq!(record_active_processes(&inspector, &sink), 0);
        assert!(buffer.contents().is_empty());
    }
}
