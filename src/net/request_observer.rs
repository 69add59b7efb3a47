//! Single host subscription multiplexed onto many HTTP observers.
//!
//! [`HttpRequestObserver`] is the only observer registered on the host
//! network channel. Listeners register with it instead, and it keeps the
//! host subscription alive exactly while at least one listener exists.
//!
//! # Delivery
//!
//! Fan-out is synchronous and in registration order. Every listener still
//! registered when an event arrives gets it once; a failing or panicking
//! listener is logged and skipped. A slow listener delays everyone behind
//! it, and the host as well.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use super::notification::{HostObserver, NotificationService};
use super::panic_message;
use crate::domain::{HTTP_EVENT, HttpChannel, HttpTopic, NotificationSubject, crop_string};
use crate::error::MonitorError;
use crate::identity::{contains_instance, remove_instance};

const TARGET: &str = "httpmonitor::http_observer";

/// Listener for HTTP lifecycle events.
pub trait HttpObserver: fmt::Debug {
    /// Name used in diagnostics.
    fn dispatch_name(&self) -> &str;

    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Errors are logged by the request observer and never reach the host
    /// or other listeners.
    fn observe(
        &self,
        channel: &dyn HttpChannel,
        topic: HttpTopic,
        data: Option<&str>,
    ) -> anyhow::Result<()>;
}

/// Result of one fan-out pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FanOut {
    /// Listeners that handled the event.
    pub delivered: usize,
    /// Listeners that returned an error or panicked.
    pub failed: usize,
}

/// The process-wide HTTP observer.
///
/// Created through [`HttpRequestObserver::new`], which hands out an [`Rc`]
/// because the host subscription refers back to this instance.
#[derive(Debug)]
pub struct HttpRequestObserver {
    service: Rc<dyn NotificationService>,
    observers: RefCell<Vec<Rc<dyn HttpObserver>>>,
    observing: Cell<bool>,
    this: Weak<Self>,
    crop_length: usize,
}

impl HttpRequestObserver {
    /// Creates an observer bound to the host `service`. Nothing is
    /// subscribed until the first listener is added.
    #[must_use]
    pub fn new(service: Rc<dyn NotificationService>, crop_length: usize) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            service,
            observers: RefCell::new(Vec::new()),
            observing: Cell::new(false),
            this: Weak::clone(this),
            crop_length,
        })
    }

    /// `true` while subscribed to the host channel.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observing.get()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Dispatch names of the registered listeners, in order.
    #[must_use]
    pub fn observer_names(&self) -> Vec<String> {
        self.observers
            .borrow()
            .iter()
            .map(|o| o.dispatch_name().to_string())
            .collect()
    }

    /// Registers `observer`. An empty `topic` means [`HTTP_EVENT`].
    ///
    /// Adding an observer that is already registered only logs a warning.
    /// The first listener subscribes the host channel.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidArgument`] for any topic other than
    /// [`HTTP_EVENT`]; nothing changes in that case.
    pub fn add_observer(
        &self,
        observer: Rc<dyn HttpObserver>,
        topic: &str,
    ) -> Result<(), MonitorError> {
        validate_topic(topic)?;

        if contains_instance(self.observers.borrow().as_slice(), &observer) {
            warn!(
                target: TARGET,
                observer = observer.dispatch_name(),
                observers = ?self.observer_names(),
                "addObserver; observer already registered"
            );
            return Ok(());
        }

        let count = {
            let mut observers = self.observers.borrow_mut();
            observers.push(Rc::clone(&observer));
            observers.len()
        };
        debug!(target: TARGET, count, added = observer.dispatch_name(), "addObserver");

        if count > 0 {
            self.register_observers();
        }
        Ok(())
    }

    /// Unregisters `observer`. An empty `topic` means [`HTTP_EVENT`].
    ///
    /// Removing the last listener unsubscribes the host channel. Removing
    /// a listener that is not registered is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidArgument`] for any topic other than
    /// [`HTTP_EVENT`].
    pub fn remove_observer(
        &self,
        observer: &Rc<dyn HttpObserver>,
        topic: &str,
    ) -> Result<(), MonitorError> {
        validate_topic(topic)?;

        let (removed, count) = {
            let mut observers = self.observers.borrow_mut();
            let removed = remove_instance(&mut *observers, observer);
            (removed, observers.len())
        };

        if !removed {
            debug!(
                target: TARGET,
                observer = observer.dispatch_name(),
                "removeObserver; no such observer"
            );
            return Ok(());
        }

        if count == 0 {
            self.unregister_observers();
        }
        debug!(
            target: TARGET,
            count,
            removed = observer.dispatch_name(),
            observers = ?self.observer_names(),
            "removeObserver"
        );
        Ok(())
    }

    /// Delivers one event to every registered listener, in order.
    ///
    /// The listener list is snapshotted first, so listeners may add or
    /// remove observers from inside their callback. Additions wait for the
    /// next event; a listener removed mid-pass is skipped.
    pub fn notify_observers(
        &self,
        channel: &dyn HttpChannel,
        topic: HttpTopic,
        data: Option<&str>,
    ) -> FanOut {
        let observers = self.observers.borrow().clone();
        trace!(
            target: TARGET,
            count = observers.len(),
            topic = topic.as_str(),
            request = %crop_string(channel.url(), self.crop_length),
            "notifyObservers"
        );

        let mut report = FanOut::default();
        for observer in &observers {
            if !contains_instance(self.observers.borrow().as_slice(), observer) {
                continue;
            }
            let outcome = catch_unwind(AssertUnwindSafe(|| observer.observe(channel, topic, data)));
            match outcome {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(err)) => {
                    report.failed += 1;
                    warn!(
                        target: TARGET,
                        observer = observer.dispatch_name(),
                        topic = topic.as_str(),
                        error = %err,
                        "notifyObservers; observer failed"
                    );
                }
                Err(payload) => {
                    report.failed += 1;
                    warn!(
                        target: TARGET,
                        observer = observer.dispatch_name(),
                        topic = topic.as_str(),
                        panic = %panic_message(payload.as_ref()),
                        "notifyObservers; observer panicked"
                    );
                }
            }
        }
        report
    }

    fn host_handle(&self) -> Weak<dyn HostObserver> {
        let handle: Weak<Self> = Weak::clone(&self.this);
        handle
    }

    fn register_observers(&self) {
        debug!(
            target: TARGET,
            count = self.observer_count(),
            active = self.observing.get(),
            "registerObservers"
        );
        if !self.observing.get() {
            let handle = self.host_handle();
            for topic in HttpTopic::ALL {
                self.service.add_observer(Weak::clone(&handle), topic.as_str());
            }
        }
        self.observing.set(true);
    }

    fn unregister_observers(&self) {
        debug!(
            target: TARGET,
            count = self.observer_count(),
            active = self.observing.get(),
            "unregisterObservers"
        );
        if self.observing.get() {
            let handle = self.host_handle();
            for topic in HttpTopic::ALL {
                self.service.remove_observer(&handle, topic.as_str());
            }
        }
        self.observing.set(false);
    }
}

impl HostObserver for HttpRequestObserver {
    fn observe(&self, subject: &dyn NotificationSubject, topic: &str, data: Option<&str>) {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let Some(channel) = subject.as_http_channel() else {
                return;
            };
            if let Some(topic) = HttpTopic::from_topic(topic) {
                self.notify_observers(channel, topic, data);
            }
        }));
        if let Err(payload) = outcome {
            warn!(
                target: TARGET,
                topic,
                panic = %panic_message(payload.as_ref()),
                "observe; dispatch aborted"
            );
        }
    }
}

fn validate_topic(topic: &str) -> Result<(), MonitorError> {
    if topic.is_empty() || topic == HTTP_EVENT {
        Ok(())
    } else {
        Err(MonitorError::InvalidArgument {
            topic: topic.to_string(),
        })
    }
}
