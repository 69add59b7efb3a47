//! Network layer: host channel contract, request observer and consumers.

use std::any::Any;

pub mod notification;
pub mod request_observer;
pub mod traffic_log;

pub use notification::{HostObserver, LocalNotificationService, NotificationService};
pub use request_observer::{FanOut, HttpObserver, HttpRequestObserver};
pub use traffic_log::{TrafficEntry, TrafficLog};

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
