//! # Session Controller
//!
//! Owns one recording session from start to stop.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle -> Starting -> Running -> Stopping -> Idle
//!            |
//!            +-> Idle (a channel file could not be opened)
//! ```
//!
//! Starting opens every channel file, writes the session-start snapshots,
//! registers the notification subscribers and spawns the pollers. Stopping
//! undoes that in reverse: subscribers first, so no callback can write once
//! `stop` returns, then pollers, then the files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::channel::Channel;
use crate::config::RecorderConfig;
use crate::error::{RecorderError, Result};
use crate::fault::Orchestrator;
use crate::host::{Host, SubscriptionId};
use crate::monitor::battery::BatterySubscriber;
use crate::monitor::bearer::BearerSubscriber;
use crate::monitor::bluetooth::BluetoothSubscriber;
use crate::monitor::camera::CameraPoller;
use crate::monitor::capacity::CapacityGuard;
use crate::monitor::gps::{GpsFix, GpsPoller, GpsStatusSubscriber};
use crate::monitor::process::record_active_processes;
use crate::monitor::radio::RadioSubscriber;
use crate::monitor::rotation::RotationSubscriber;
use crate::monitor::screen::{ScreenPoller, ScreenState, ScreenSubscriber};
use crate::monitor::wifi::WifiSubscriber;
use crate::monitor::{spawn_poller, Subscriber};
use crate::trace::{SinkSet, SystemClock, TimeSource};

/// Lifecycle state of a [`SessionController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Running,
    Stopping,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Starting => "starting",
            SessionState::Running => "running",
            SessionState::Stopping => "stopping",
        };
        f.write_str(name)
    }
}

/// Resources that only exist while a session runs
struct ActiveSession {
    sinks: SinkSet,
    subscriptions: Vec<SubscriptionId>,
    pollers: Vec<(&'static str, JoinHandle<()>)>,
    cancel: CancellationToken,
}

/// Starts and stops recording sessions into one trace folder
pub struct SessionController {
    trace_dir: PathBuf,
    config: RecorderConfig,
    host: Host,
    orchestrator: Arc<dyn Orchestrator>,
    clock: Arc<dyn TimeSource>,
    state: SessionState,
    active: Option<ActiveSession>,
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("trace_dir", &self.trace_dir)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Create an idle controller writing into `trace_dir`
    ///
    /// The folder must already exist when [`start`](Self::start) is called.
    pub fn new(
        trace_dir: impl Into<PathBuf>,
        config: RecorderConfig,
        host: Host,
        orchestrator: Arc<dyn Orchestrator>,
    ) -> Self {
        Self::with_clock(trace_dir, config, host, orchestrator, Arc::new(SystemClock))
    }

    /// Like [`new`](Self::new) with a custom event clock
    pub fn with_clock(
        trace_dir: impl Into<PathBuf>,
        config: RecorderConfig,
        host: Host,
        orchestrator: Arc<dyn Orchestrator>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            trace_dir: trace_dir.into(),
            config,
            host,
            orchestrator,
            clock,
            state: SessionState::Idle,
            active: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn trace_dir(&self) -> &Path {
        &self.trace_dir
    }

    /// Open every channel and start all monitors
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is idle
    /// - `Config` if the configuration fails validation
    /// - `ChannelOpen` if any channel file cannot be opened; no monitor has
    ///   started and the session is idle again
    pub async fn start(&mut self) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(RecorderError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }
        self.config.validate()?;

        self.state = SessionState::Starting;
        info!("Starting trace session in {}", self.trace_dir.display());

        let sinks = match SinkSet::open_all(
            &self.trace_dir,
            Arc::clone(&self.clock),
            Arc::clone(&self.orchestrator),
        ) {
            Ok(sinks) => sinks,
            Err(e) => {
                error!("Session start aborted: {}", e);
                self.state = SessionState::Idle;
                return Err(e);
            }
        };

        let bluetooth = Arc::new(BluetoothSubscriber::new(
            Arc::clone(&self.host.bluetooth),
            sinks.sink(Channel::Bluetooth),
        ));
        bluetooth.record_current_state();
        record_active_processes(
            self.host.processes.as_ref(),
            &sinks.sink(Channel::ActiveProcess),
        );

        let gps_fix = GpsFix::new();
        let screen = ScreenState::new();
        let subscriptions =
            self.register_subscribers(&sinks, bluetooth, gps_fix.clone(), screen.clone());

        let cancel = CancellationToken::new();
        let pollers = self.spawn_pollers(&sinks, gps_fix, screen, &cancel);

        info!(
            "Trace session running: {} subscribers, {} pollers",
            subscriptions.len(),
            pollers.len()
        );
        self.active = Some(ActiveSession {
            sinks,
            subscriptions,
            pollers,
            cancel,
        });
        self.state = SessionState::Running;
        Ok(())
    }

    fn register_subscribers(
        &self,
        sinks: &SinkSet,
        bluetooth: Arc<BluetoothSubscriber>,
        gps_fix: GpsFix,
        screen: ScreenState,
    ) -> Vec<SubscriptionId> {
        let host = &self.host;
        let subscribers: Vec<Arc<dyn Subscriber>> = vec![
            Arc::new(BatterySubscriber::new(sinks.sink(Channel::Battery))),
            Arc::new(WifiSubscriber::new(
                Arc::clone(&host.network),
                sinks.sink(Channel::Wifi),
            )),
            bluetooth,
            Arc::new(BearerSubscriber::new(
                Arc::clone(&host.network),
                Arc::clone(&host.device),
                Arc::clone(&self.orchestrator),
                sinks.sink(Channel::DeviceInfo),
                sinks.sink(Channel::DeviceDetails),
            )),
            Arc::new(ScreenSubscriber::new(
                Arc::clone(&host.display),
                sinks.sink(Channel::Screen),
                screen,
            )),
            Arc::new(RotationSubscriber::new(
                Arc::clone(&host.display),
                sinks.sink(Channel::ScreenRotation),
            )),
            Arc::new(RadioSubscriber::new(
                Arc::clone(&host.network),
                sinks.sink(Channel::Radio),
            )),
            Arc::new(GpsStatusSubscriber::new(sinks.sink(Channel::Gps), gps_fix)),
        ];

        subscribers
            .into_iter()
            .map(|subscriber| host.notifications.register(subscriber))
            .collect()
    }

    fn spawn_pollers(
        &self,
        sinks: &SinkSet,
        gps_fix: GpsFix,
        screen: ScreenState,
        cancel: &CancellationToken,
    ) -> Vec<(&'static str, JoinHandle<()>)> {
        let host = &self.host;
        let polling = &self.config.polling;

        vec![
            (
                "camera",
                spawn_poller(
                    CameraPoller::new(
                        Arc::clone(&host.processes),
                        sinks.sink(Channel::Camera),
                        &self.config.camera.process_keyword,
                    ),
                    polling.camera_interval(),
                    cancel.child_token(),
                ),
            ),
            (
                "gps",
                spawn_poller(
                    GpsPoller::new(Arc::clone(&host.location), sinks.sink(Channel::Gps), gps_fix),
                    polling.gps_interval(),
                    cancel.child_token(),
                ),
            ),
            (
                "screen",
                spawn_poller(
                    ScreenPoller::new(
                        Arc::clone(&host.display),
                        sinks.sink(Channel::Screen),
                        screen,
                    ),
                    polling.screen_interval(),
                    cancel.child_token(),
                ),
            ),
            (
                "capacity",
                spawn_poller(
                    CapacityGuard::new(
                        Arc::clone(&host.storage),
                        self.trace_dir.clone(),
                        self.config.capacity.min_free_kb,
                        Arc::clone(&self.orchestrator),
                    ),
                    polling.capacity_interval(),
                    cancel.child_token(),
                ),
            ),
        ]
    }

    /// Stop every monitor and close all channel files
    ///
    /// Once this returns, no further line is written even if a host
    /// notification arrives, and every file is flushed.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is running
    /// - `TaskJoin` if a poller task panicked; the files are still closed
    pub async fn stop(&mut self) -> Result<()> {
        if self.state != SessionState::Running {
            return Err(RecorderError::InvalidState {
                operation: "stop",
                state: self.state,
            });
        }

        self.state = SessionState::Stopping;
        info!("Stopping trace session");

        let mut result = Ok(());
        if let Some(active) = self.active.take() {
            for id in &active.subscriptions {
                if !self.host.notifications.unregister(*id) {
                    debug!("Subscription {:?} was already removed", id);
                }
            }

            active.cancel.cancel();
            for (name, handle) in active.pollers {
                if let Err(e) = handle.await {
                    error!("{} poller task failed: {}", name, e);
                    if result.is_ok() {
                        result = Err(RecorderError::TaskJoin(format!("{} poller: {}", name, e)));
                    }
                }
            }

            let failures = active.sinks.close_all();
            if failures > 0 {
                warn!("{} trace files failed to flush on close", failures);
            }
        }

        self.state = SessionState::Idle;
        self.orchestrator.on_session_ended();
        info!("Trace session stopped");
        result
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        // Dropped without stop(): detach from the host and halt the pollers.
        // Sinks flush as they drop.
        if let Some(active) = self.active.take() {
            warn!("Session dropped while {}, stopping monitors", self.state);
            for id in &active.subscriptions {
                self.host.notifications.unregister(*id);
            }
            active.cancel.cancel();
        }
    }
}
