//! Test doubles for trace output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::channel::Channel;
use crate::fault::mocks::RecordingOrchestrator;

use super::clock::TimeSource;
use super::sink::{ChannelSink, LINE_SEPARATOR};

/// Timestamp written by sinks from [`memory_sink`]
pub const TEST_TIMESTAMP: &str = "1.000";

/// Sink backed by memory, stamped with [`TEST_TIMESTAMP`]
pub fn memory_sink(channel: Channel) -> (Arc<ChannelSink>, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let sink = ChannelSink::from_writer(
        channel,
        buffer.clone(),
        Arc::new(FixedClock::new(TEST_TIMESTAMP)),
        Arc::new(RecordingOrchestrator::new()),
    );
    (Arc::new(sink), buffer)
}

/// Time source that always returns the same timestamp
#[derive(Debug, Clone)]
pub struct FixedClock {
    stamp: String,
}

impl FixedClock {
    pub fn new(stamp: &str) -> Self {
        Self { stamp: stamp.to_string() }
    }
}

impl TimeSource for FixedClock {
    fn event_timestamp(&self) -> String {
        self.stamp.clone()
    }
}

/// In-memory writer whose contents stay readable after the sink drops it
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .split(LINE_SEPARATOR)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Lines with the test timestamp prefix removed
    pub fn payloads(&self) -> Vec<String> {
        let prefix = format!("{} ", TEST_TIMESTAMP);
        self.lines()
            .into_iter()
            .map(|line| line.strip_prefix(&prefix).map(str::to_string).unwrap_or(line))
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that rejects every write
#[derive(Debug, Clone, Copy)]
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "Mock write error"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "Mock flush error"))
    }
}
