//! # Orchestrator Signals
//!
//! The recorder never decides a session's fate on its own. Conditions that
//! may end a session are raised as [`Fault`]s through the [`Orchestrator`]
//! the session was constructed with; delivery is fire-and-forget.

use std::fmt;

use crate::channel::Channel;

/// Condition raised to the orchestrator while a session runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Free storage dropped below the configured threshold
    LowStorage { free_kb: u64, threshold_kb: u64 },

    /// The active data bearer diverged from the session baseline
    BearerChanged {
        baseline: i32,
        current: i32,
        connected: bool,
    },

    /// A line could not be appended and was dropped
    WriteFailed { channel: Channel, reason: String },
}

impl Fault {
    /// Whether the orchestrator is expected to abort the session
    pub fn is_fatal(&self) -> bool {
        matches!(self, Fault::LowStorage { .. } | Fault::BearerChanged { .. })
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::LowStorage { free_kb, threshold_kb } => {
                write!(f, "low storage: {} KB free (minimum {} KB)", free_kb, threshold_kb)
            }
            Fault::BearerChanged { baseline, current, connected } => write!(
                f,
                "bearer changed: baseline type {}, now type {} (connected: {})",
                baseline, current, connected
            ),
            Fault::WriteFailed { channel, reason } => {
                write!(f, "write to {} trace failed: {}", channel, reason)
            }
        }
    }
}

/// External component that owns the session and reacts to its signals
#[cfg_attr(test, mockall::automock)]
pub trait Orchestrator: Send + Sync {
    /// Called from monitor tasks and notification callbacks; may repeat
    ///
    /// Notification callbacks run while the dispatcher's read lock is held.
    /// Implementations must return promptly and must not call
    /// [`SessionController::stop`](crate::session::SessionController::stop)
    /// or [`NotificationDispatcher::unregister`](crate::host::dispatcher::NotificationDispatcher::unregister)
    /// from here: unregistering takes the write lock and would deadlock.
    /// Hand the stop to another task instead, e.g. over a channel.
    fn on_fault(&self, fault: Fault);

    /// Called once after every channel file has been closed
    fn on_session_ended(&self);
}
