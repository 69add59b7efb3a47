//! Built-in consumer that remembers recent HTTP events.

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::request_observer::HttpObserver;
use crate::domain::{HttpChannel, HttpTopic, MonitorContext, RequestId, Value};
use crate::registry::Module;

/// One observed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficEntry {
    /// Transaction identifier.
    pub request_id: RequestId,
    /// Request method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Event class.
    pub topic: HttpTopic,
    /// Response status, when known at the time of the event.
    pub status: Option<u16>,
    /// When the event was observed.
    pub observed_at: DateTime<Utc>,
}

/// Bounded log of observed events; registered both as a module and as an
/// HTTP observer.
#[derive(Debug)]
pub struct TrafficLog {
    capacity: usize,
    entries: RefCell<VecDeque<TrafficEntry>>,
}

impl TrafficLog {
    /// Creates an empty log keeping at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RefCell::new(VecDeque::with_capacity(capacity.min(1_024))),
        }
    }

    /// Number of entries currently kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Copy of the kept entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<TrafficEntry> {
        self.entries.borrow().iter().cloned().collect()
    }

    /// Most recent entry for `url`.
    #[must_use]
    pub fn latest_for_url(&self, url: &str) -> Option<TrafficEntry> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .find(|entry| entry.url == url)
            .cloned()
    }
}

impl HttpObserver for TrafficLog {
    fn dispatch_name(&self) -> &str {
        "trafficLog"
    }

    fn observe(
        &self,
        channel: &dyn HttpChannel,
        topic: HttpTopic,
        _data: Option<&str>,
    ) -> anyhow::Result<()> {
        let mut entries = self.entries.borrow_mut();
        while entries.len() >= self.capacity {
            if entries.pop_front().is_none() {
                break;
            }
        }
        entries.push_back(TrafficEntry {
            request_id: channel.request_id(),
            method: channel.method().to_string(),
            url: channel.url().to_string(),
            topic,
            status: channel.response_status(),
            observed_at: Utc::now(),
        });
        Ok(())
    }
}

impl Module for TrafficLog {
    fn dispatch_name(&self) -> &str {
        "trafficLog"
    }

    fn shutdown(&self) -> anyhow::Result<()> {
        self.entries.borrow_mut().clear();
        Ok(())
    }

    fn get_object_by_url(&self, _context: &MonitorContext, url: &str) -> Option<Value> {
        let entry = self.latest_for_url(url)?;
        match serde_json::to_value(&entry) {
            Ok(json) => Some(Value::Json(json)),
            Err(err) => {
                tracing::warn!(
                    target: "httpmonitor::registration",
                    url,
                    error = %err,
                    "trafficLog; entry not serializable"
                );
                None
            }
        }
    }
}
