//! Host notification channel contract and an in-process implementation.
//!
//! The host delivers `(subject, topic, data)` triples to observers that
//! subscribed to a topic name. Subscriptions hold [`Weak`] handles so the
//! host never keeps a subscriber alive on its own.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::domain::NotificationSubject;

/// Callback registered on the host channel.
pub trait HostObserver: fmt::Debug {
    /// Receives one notification. Must not fail towards the host.
    fn observe(&self, subject: &dyn NotificationSubject, topic: &str, data: Option<&str>);
}

/// Subscribe/unsubscribe-by-topic primitive offered by the host.
pub trait NotificationService: fmt::Debug {
    /// Subscribes `observer` to `topic`.
    fn add_observer(&self, observer: Weak<dyn HostObserver>, topic: &str);

    /// Drops the subscription of `observer` to `topic`.
    fn remove_observer(&self, observer: &Weak<dyn HostObserver>, topic: &str);
}

fn same_observer(a: &Weak<dyn HostObserver>, b: &Weak<dyn HostObserver>) -> bool {
    std::ptr::addr_eq(a.as_ptr(), b.as_ptr())
}

/// Single-threaded notification service living in the same process.
#[derive(Debug, Default)]
pub struct LocalNotificationService {
    topics: RefCell<HashMap<String, Vec<Weak<dyn HostObserver>>>>,
}

impl LocalNotificationService {
    /// Creates a service without subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions on `topic`.
    #[must_use]
    pub fn observer_count(&self, topic: &str) -> usize {
        self.topics
            .borrow()
            .get(topic)
            .map_or(0, |list| list.iter().filter(|w| w.strong_count() > 0).count())
    }

    /// Delivers a notification to every live subscriber of `topic`.
    ///
    /// Returns the number of observers notified. Subscribers may
    /// (un)subscribe while being notified; the change applies to the next
    /// notification.
    pub fn notify_observers(
        &self,
        subject: &dyn NotificationSubject,
        topic: &str,
        data: Option<&str>,
    ) -> usize {
        let targets: Vec<Rc<dyn HostObserver>> = {
            let mut topics = self.topics.borrow_mut();
            let Some(list) = topics.get_mut(topic) else {
                return 0;
            };
            list.retain(|w| w.strong_count() > 0);
            list.iter().filter_map(Weak::upgrade).collect()
        };

        for observer in &targets {
            observer.observe(subject, topic, data);
        }
        targets.len()
    }
}

impl NotificationService for LocalNotificationService {
    fn add_observer(&self, observer: Weak<dyn HostObserver>, topic: &str) {
        let mut topics = self.topics.borrow_mut();
        let list = topics.entry(topic.to_string()).or_default();
        if !list.iter().any(|w| same_observer(w, &observer)) {
            list.push(observer);
        }
    }

    fn remove_observer(&self, observer: &Weak<dyn HostObserver>, topic: &str) {
        if let Some(list) = self.topics.borrow_mut().get_mut(topic) {
            list.retain(|w| !same_observer(w, observer));
        }
    }
}
