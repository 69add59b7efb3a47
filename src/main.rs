//! httpmonitor entry point.
//!
//! Starts a monitoring session, replays JSON-lines traffic from stdin
//! through an in-process host channel, then tears the session down.

use std::rc::Rc;

use tracing_subscriber::EnvFilter;

use httpmonitor::app::HttpMonitor;
use httpmonitor::config::MonitorConfig;
use httpmonitor::net::{LocalNotificationService, NotificationService};
use httpmonitor::replay;

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = MonitorConfig::from_env()?;

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Build the host channel and the session
    let service = Rc::new(LocalNotificationService::new());
    let host: Rc<dyn NotificationService> = Rc::<LocalNotificationService>::clone(&service);
    let mut monitor = HttpMonitor::new(&config, host);

    if let Err(err) = monitor.initialize() {
        tracing::error!(error = %err, code = err.error_code(), "initialize failed");
    }

    let summary = replay::replay(std::io::stdin().lock(), &service);

    tracing::info!(
        entries = monitor.traffic_log().len(),
        observers = ?monitor.request_observer().observer_names(),
        "replay finished"
    );

    if let Err(err) = monitor.destroy() {
        tracing::error!(error = %err, code = err.error_code(), "shutdown failed");
    }

    let summary = summary?;
    tracing::info!(
        records = summary.records,
        notifications = summary.notifications,
        "done"
    );
    Ok(())
}
