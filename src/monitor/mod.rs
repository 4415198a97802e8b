//! # Monitor Module
//!
//! Producers of trace records.
//!
//! This module handles:
//! - Fixed-interval pollers with change-only writes (camera, GPS, screen)
//! - The storage capacity guard
//! - Notification subscribers (battery, wifi, bluetooth, bearer, screen,
//!   rotation, radio, GPS status)
//! - One-shot snapshots taken at session start (bluetooth, active processes)
//!
//! Every monitor owns its previous-value state. Nothing here is shared
//! between monitors except the channel sinks they write to.

pub mod battery;
pub mod bearer;
pub mod bluetooth;
pub mod camera;
pub mod capacity;
pub mod edge;
pub mod gps;
pub mod process;
pub mod radio;
pub mod rotation;
pub mod screen;
pub mod wifi;

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::host::{Notification, NotificationKind};

pub use edge::EdgeDetector;

/// Periodic sampling task body
///
/// `tick` runs once per interval on the poller's own task, so the poller
/// can keep its state in plain fields.
pub trait Poller: Send + 'static {
    fn name(&self) -> &'static str;

    fn tick(&mut self);
}

/// Callback registered for host notifications
pub trait Subscriber: Send + Sync {
    fn name(&self) -> &'static str;

    /// Notification categories this subscriber is registered for
    fn interests(&self) -> &'static [NotificationKind];

    fn on_notification(&self, notification: &Notification);
}

/// Run a poller on its own fixed-interval task until `cancel` fires
///
/// The first tick happens one full period after spawning. A tick already
/// running when cancellation is requested completes; no further tick starts.
pub fn spawn_poller<P: Poller>(
    mut poller: P,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        debug!("{} poller started ({:?} interval)", poller.name(), period);
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("{} poller stopped", poller.name());
                    break;
                }
                _ = ticker.tick() => poller.tick(),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting(Arc<AtomicUsize>);

    impl Poller for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn tick(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_at_fixed_interval() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_poller(
            Counting(ticks.clone()),
            Duration::from_millis(500),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(1_250)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_after_cancel() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_poller(
            Counting(ticks.clone()),
            Duration::from_millis(500),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(600)).await;
        cancel.cancel();
        handle.await.unwrap();

        let after_stop = ticks.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_stop);
        assert_eq!(after_stop, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_poller(
            Counting(ticks.clone()),
            Duration::from_secs(5),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        cancel.cancel();
        handle.await.unwrap();
    }
}
