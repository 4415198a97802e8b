//! # Notification Dispatcher
//!
//! Routes host notifications to the subscribers registered for their
//! category. The host integration calls [`NotificationDispatcher::dispatch`]
//! from whatever thread delivers its notifications.
//!
//! ## Rules
//! - Callbacks run synchronously on the dispatching thread.
//! - `unregister` waits for callbacks already in flight to finish; once it
//!   returns, the subscriber is never called again.
//! - Callbacks must not call back into the dispatcher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::monitor::Subscriber;

use super::notification::Notification;

/// Handle returned by [`NotificationDispatcher::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Registration {
    id: SubscriptionId,
    subscriber: Arc<dyn Subscriber>,
}

/// Registry of subscribers keyed by notification category
#[derive(Default)]
pub struct NotificationDispatcher {
    registrations: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for the categories it declares
    pub fn register(&self, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(
            "Registering {} subscriber for {:?}",
            subscriber.name(),
            subscriber.interests()
        );
        self.write().push(Registration { id, subscriber });
        id
    }

    /// Remove a subscription, waiting out any in-flight callback
    ///
    /// Returns `false` if the id was not registered.
    pub fn unregister(&self, id: SubscriptionId) -> bool {
        let mut registrations = self.write();
        let before = registrations.len();
        registrations.retain(|registration| registration.id != id);
        before != registrations.len()
    }

    /// Deliver a notification to every interested subscriber
    ///
    /// Returns the number of subscribers that received it.
    pub fn dispatch(&self, notification: &Notification) -> usize {
        let kind = notification.kind();
        let registrations = self.read();
        let mut delivered = 0;

        for registration in registrations.iter() {
            if registration.subscriber.interests().contains(&kind) {
                registration.subscriber.on_notification(notification);
                delivered += 1;
            }
        }

        trace!("Dispatched {:?} to {} subscriber(s)", kind, delivered);
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Registration>> {
        self.registrations.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Registration>> {
        self.registrations.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::notification::{BatteryReport, NotificationKind};
    use std::sync::Mutex;

    struct Collecting {
        interests: &'static [NotificationKind],
        seen: Mutex<Vec<Notification>>,
    }

    impl Collecting {
        fn new(interests: &'static [NotificationKind]) -> Arc<Self> {
            Arc::new(Self {
                interests,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Subscriber for Collecting {
        fn name(&self) -> &'static str {
            "collecting"
        }

        fn interests(&self) -> &'static [NotificationKind] {
            self.interests
        }

        fn on_notification(&self, notification: &Notification) {
            self.seen.lock().unwrap().push(notification.clone());
        }
    }

    #[test]
    fn test_dispatch_routes_by_interest() {
        let dispatcher = NotificationDispatcher::new();
        let screen = Collecting::new(&[NotificationKind::Screen]);
        let battery = Collecting::new(&[NotificationKind::Battery]);
        dispatcher.register(screen.clone());
        dispatcher.register(battery.clone());

        assert_eq!(dispatcher.dispatch(&Notification::ScreenOn), 1);

        assert_eq!(screen.seen(), vec![Notification::ScreenOn]);
        assert!(battery.seen().is_empty());
    }

    #[test]
    fn test_multi_interest_subscriber() {
        let dispatcher = NotificationDispatcher::new();
        let subscriber = Collecting::new(&[NotificationKind::Screen, NotificationKind::Battery]);
        dispatcher.register(subscriber.clone());

        dispatcher.dispatch(&Notification::ScreenOff);
        dispatcher.dispatch(&Notification::BatteryChanged(BatteryReport::default()));

        assert_eq!(subscriber.seen().len(), 2);
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let dispatcher = NotificationDispatcher::new();
        let subscriber = Collecting::new(&[NotificationKind::Configuration]);
        let id = dispatcher.register(subscriber.clone());

        dispatcher.dispatch(&Notification::ConfigurationChanged);
        assert!(dispatcher.unregister(id));
        assert_eq!(dispatcher.dispatch(&Notification::ConfigurationChanged), 0);

        assert_eq!(subscriber.seen().len(), 1);
        assert_eq!(dispatcher.subscriber_count(), 0);
    }

    #[test]
    fn test_unregister_unknown_id() {
        let dispatcher = NotificationDispatcher::new();
        let id = dispatcher.register(Collecting::new(&[NotificationKind::Wifi]));
        assert!(dispatcher.unregister(id));
        assert!(!dispatcher.unregister(id));
    }

    #[test]
    fn test_unrecognized_reaches_nobody() {
        let dispatcher = NotificationDispatcher::new();
        dispatcher.register(Collecting::new(&[NotificationKind::Wifi, NotificationKind::Screen]));

        let delivered = dispatcher.dispatch(&Notification::Unrecognized("TIME_TICK".to_string()));
        assert_eq!(delivered, 0);
    }
}
