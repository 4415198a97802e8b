//! # Error Types
//!
//! Custom error types for the peripheral recorder using `thiserror`.
//!
//! Only failures that stop a session from starting or from being driven
//! correctly are errors. Conditions the orchestrator has to react to while a
//! session runs (low storage, bearer change, dropped lines) are reported as
//! [`Fault`](crate::fault::Fault) values instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::channel::Channel;

/// Main error type for the peripheral recorder
#[derive(Debug, Error)]
pub enum RecorderError {
    /// A channel file could not be opened at session start
    #[error("failed to open {channel} trace file {}: {source}", path.display())]
    ChannelOpen {
        channel: Channel,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lifecycle call issued in the wrong session state
    #[error("cannot {operation} session while {state}")]
    InvalidState {
        operation: &'static str,
        state: crate::session::SessionState,
    },

    /// A poller task ended abnormally
    #[error("poller task failed: {0}")]
    TaskJoin(String),

    /// Diagnostic logging could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type alias for the peripheral recorder
pub type Result<T> = std::result::Result<T, RecorderError>;
