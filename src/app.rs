//! Application object tying the registry and the request observer together.
//!
//! One [`HttpMonitor`] exists per monitoring session. It owns the
//! [`Registry`] and the [`HttpRequestObserver`], and registers the built-in
//! [`TrafficLog`] consumer on [`HttpMonitor::initialize`].

use std::rc::Rc;

use crate::config::MonitorConfig;
use crate::domain::HTTP_EVENT;
use crate::error::MonitorError;
use crate::net::{HttpObserver, HttpRequestObserver, NotificationService, TrafficLog};
use crate::registry::{Module, Readiness, Registry};

const TARGET: &str = "httpmonitor::registration";

/// A monitoring session.
#[derive(Debug)]
pub struct HttpMonitor {
    registry: Registry,
    request_observer: Rc<HttpRequestObserver>,
    traffic_log: Rc<TrafficLog>,
}

impl HttpMonitor {
    /// Builds a session on top of the host notification `service`.
    #[must_use]
    pub fn new(config: &MonitorConfig, service: Rc<dyn NotificationService>) -> Self {
        Self {
            registry: Registry::new(),
            request_observer: HttpRequestObserver::new(service, config.string_crop_length),
            traffic_log: Rc::new(TrafficLog::new(config.traffic_log_capacity)),
        }
    }

    /// Registers the built-in modules, initializes the registry and starts
    /// observing HTTP traffic. Once the registry is initialized, further
    /// calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::ModuleInitialize`] if a module fails to
    /// initialize; HTTP observation is not started in that case.
    pub fn initialize(&mut self) -> Result<(), MonitorError> {
        if self.registry.readiness() == Readiness::Initialized {
            tracing::debug!(target: TARGET, "httpMonitor already initialized");
            return Ok(());
        }
        let module: Rc<dyn Module> = Rc::<TrafficLog>::clone(&self.traffic_log);
        self.registry.register_module([module])?;
        self.registry.initialize()?;
        self.request_observer
            .add_observer(self.traffic_log_observer(), HTTP_EVENT)?;
        tracing::info!(
            target: TARGET,
            modules = self.registry.modules().len(),
            observers = self.request_observer.observer_count(),
            "httpMonitor initialized"
        );
        Ok(())
    }

    /// Stops observing and shuts the registry down.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidArgument`] only if the observer
    /// contract is broken; the registry is shut down regardless.
    pub fn destroy(&mut self) -> Result<(), MonitorError> {
        let removed = self
            .request_observer
            .remove_observer(&self.traffic_log_observer(), HTTP_EVENT);
        self.registry.shutdown();
        tracing::info!(target: TARGET, "httpMonitor destroyed");
        removed
    }

    /// The module registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access for registering additional modules, panels and reps.
    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The process-wide HTTP observer.
    #[must_use]
    pub fn request_observer(&self) -> &Rc<HttpRequestObserver> {
        &self.request_observer
    }

    /// The built-in traffic log.
    #[must_use]
    pub fn traffic_log(&self) -> &TrafficLog {
        &self.traffic_log
    }

    fn traffic_log_observer(&self) -> Rc<dyn HttpObserver> {
        Rc::<TrafficLog>::clone(&self.traffic_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HttpTransaction;
    use crate::net::LocalNotificationService;

    fn monitor() -> (Rc<LocalNotificationService>, HttpMonitor) {
        let service = Rc::new(LocalNotificationService::new());
        let host: Rc<dyn NotificationService> = Rc::<LocalNotificationService>::clone(&service);
        (service, HttpMonitor::new(&MonitorConfig::default(), host))
    }

    #[test]
    fn initialize_starts_observing() {
        let (service, mut app) = monitor();
        assert!(!app.request_observer().is_observing());

        assert!(app.initialize().is_ok());
        assert_eq!(app.registry().readiness(), Readiness::Initialized);
        assert!(app.request_observer().is_observing());

        let tx = HttpTransaction::new("GET", "https://example.com/");
        service.notify_observers(&tx, "http-on-modify-request", None);
        assert_eq!(app.traffic_log().len(), 1);
    }

    #[test]
    fn destroy_unsubscribes_and_shuts_down() {
        let (service, mut app) = monitor();
        assert!(app.initialize().is_ok());
        assert!(app.destroy().is_ok());

        assert!(!app.request_observer().is_observing());
        assert!(app.registry().is_shut_down());
        assert_eq!(service.observer_count("http-on-modify-request"), 0);
    }

    #[test]
    fn second_initialize_is_noop() {
        let (service, mut app) = monitor();
        assert!(app.initialize().is_ok());
        assert!(app.initialize().is_ok());

        assert_eq!(app.registry().modules().len(), 1);
        assert_eq!(app.request_observer().observer_count(), 1);

        let tx = HttpTransaction::new("GET", "https://example.com/");
        service.notify_observers(&tx, "http-on-modify-request", None);
        assert_eq!(app.traffic_log().len(), 1);
    }
}
