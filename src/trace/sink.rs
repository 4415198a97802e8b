//! # Channel Sinks
//!
//! A [`ChannelSink`] owns the output stream of exactly one channel. Appends
//! are serialized by a mutex scoped to that sink only, so a poller and any
//! number of notification callbacks can address the same channel safely.
//!
//! Write failures never propagate to the producer: the line is dropped, the
//! failure is logged and reported to the orchestrator as
//! [`Fault::WriteFailed`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::channel::Channel;
use crate::error::{RecorderError, Result};
use crate::fault::{Fault, Orchestrator};

use super::clock::TimeSource;

/// Platform line separator appended to every trace line
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Platform line separator appended to every trace line
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

type Stream = Box<dyn Write + Send>;

/// Append-only text stream for one channel
pub struct ChannelSink {
    channel: Channel,
    stream: Mutex<Option<Stream>>,
    clock: Arc<dyn TimeSource>,
    orchestrator: Arc<dyn Orchestrator>,
}

impl std::fmt::Debug for ChannelSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelSink")
            .field("channel", &self.channel)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl ChannelSink {
    /// Create (or truncate) the channel's file inside `dir`
    ///
    /// # Errors
    ///
    /// Returns `ChannelOpen` if the file cannot be created.
    pub fn open(
        channel: Channel,
        dir: &Path,
        clock: Arc<dyn TimeSource>,
        orchestrator: Arc<dyn Orchestrator>,
    ) -> Result<Self> {
        let path = dir.join(channel.file_name());
        let file = File::create(&path).map_err(|source| RecorderError::ChannelOpen {
            channel,
            path: path.clone(),
            source,
        })?;

        debug!("Opened {} trace file at {}", channel, path.display());
        Ok(Self::from_writer(channel, BufWriter::new(file), clock, orchestrator))
    }

    /// Wrap an arbitrary writer as the channel's stream
    pub fn from_writer<W>(
        channel: Channel,
        writer: W,
        clock: Arc<dyn TimeSource>,
        orchestrator: Arc<dyn Orchestrator>,
    ) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            channel,
            stream: Mutex::new(Some(Box::new(writer))),
            clock,
            orchestrator,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Append one line, optionally prefixed with the current event timestamp
    ///
    /// Lines addressed to a closed sink are dropped silently.
    pub fn append(&self, text: &str, with_timestamp: bool) {
        let mut stream = self.lock();
        let Some(writer) = stream.as_mut() else {
            debug!("Dropping {} line after close: {}", self.channel, text);
            return;
        };

        let line = if with_timestamp {
            format!("{} {}{}", self.clock.event_timestamp(), text, LINE_SEPARATOR)
        } else {
            format!("{}{}", text, LINE_SEPARATOR)
        };

        if let Err(e) = writer.write_all(line.as_bytes()) {
            warn!("Failed to append to {} trace: {}", self.channel, e);
            self.orchestrator.on_fault(Fault::WriteFailed {
                channel: self.channel,
                reason: e.to_string(),
            });
        }
    }

    /// Append a line using the channel's timestamp convention
    pub fn record(&self, text: &str) {
        self.append(text, self.channel.is_timestamped());
    }

    /// Flush and release the underlying stream
    ///
    /// Closing an already closed sink is a no-op.
    pub fn close(&self) -> io::Result<()> {
        let Some(mut writer) = self.lock().take() else {
            return Ok(());
        };
        writer.flush()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Stream>> {
        // A panic mid-append leaves the stream usable.
        self.stream.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Every channel sink of one session, one per [`Channel`]
#[derive(Debug)]
pub struct SinkSet {
    sinks: Vec<Arc<ChannelSink>>,
}

impl SinkSet {
    /// Open one sink per channel in `dir`, in [`Channel::ALL`] order
    ///
    /// # Errors
    ///
    /// Fails on the first file that cannot be opened. Sinks opened before
    /// the failure are dropped, releasing their files.
    pub fn open_all(
        dir: &Path,
        clock: Arc<dyn TimeSource>,
        orchestrator: Arc<dyn Orchestrator>,
    ) -> Result<Self> {
        let mut sinks = Vec::with_capacity(Channel::ALL.len());
        for channel in Channel::ALL {
            let sink = ChannelSink::open(channel, dir, Arc::clone(&clock), Arc::clone(&orchestrator))?;
            sinks.push(Arc::new(sink));
        }

        info!("Opened {} trace files in {}", sinks.len(), dir.display());
        Ok(Self { sinks })
    }

    /// Shared handle to a channel's sink
    pub fn sink(&self, channel: Channel) -> Arc<ChannelSink> {
        Arc::clone(&self.sinks[channel.index()])
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Close every sink, continuing past failures
    ///
    /// Returns the number of sinks whose final flush failed.
    pub fn close_all(&self) -> usize {
        let mut failures = 0;
        for sink in &self.sinks {
            if let Err(e) = sink.close() {
                warn!("Failed to flush {} trace on close: {}", sink.channel, e);
                sink.orchestrator.on_fault(Fault::WriteFailed {
                    channel: sink.channel,
                    reason: e.to_string(),
                });
                failures += 1;
            }
        }
        failures
    }
}
