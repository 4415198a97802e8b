//! # Peripheral Trace Library
//!
//! Record the state of a handheld device's peripherals into per-channel
//! trace files.
//!
//! A [`SessionController`](session::SessionController) opens one append-only
//! file per [`Channel`](channel::Channel), then feeds it from two kinds of
//! producers: fixed-interval pollers that write only on change (camera, GPS,
//! screen, storage headroom) and subscribers that write on every host
//! notification (battery, wifi, bluetooth, bearer, screen on/off, rotation,
//! radio). Conditions that should end a session are raised to an
//! [`Orchestrator`](fault::Orchestrator) instead of being acted on.
//!
//! ```no_run
//! use std::sync::Arc;
//! use peripheral_trace::config::RecorderConfig;
//! use peripheral_trace::fault::Orchestrator;
//! use peripheral_trace::host::Host;
//! use peripheral_trace::session::SessionController;
//!
//! async fn record(host: Host, orchestrator: Arc<dyn Orchestrator>) -> peripheral_trace::error::Result<()> {
//!     let config = RecorderConfig::load("config/recorder.toml")?;
//!     let mut session = SessionController::new("/sdcard/trace", config, host, orchestrator);
//!     session.start().await?;
//!     // ... host notifications are delivered through host.notifications ...
//!     session.stop().await
//! }
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod fault;
pub mod host;
pub mod logging;
pub mod monitor;
pub mod session;
pub mod trace;

pub use error::{RecorderError, Result};
pub use session::{SessionController, SessionState};
