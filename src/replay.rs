//! JSON-lines traffic replay.
//!
//! Each non-empty line is a [`ReplayRecord`]:
//!
//! ```json
//! {"topic": "http-on-modify-request", "method": "GET", "url": "https://example.com/"}
//! ```
//!
//! Records are turned into [`HttpTransaction`]s and delivered through a
//! [`LocalNotificationService`] as if the host had emitted them.

use std::io::BufRead;

use serde::Deserialize;

use crate::domain::HttpTransaction;
use crate::error::MonitorError;
use crate::net::LocalNotificationService;

/// One replayed host notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplayRecord {
    /// Raw host topic; unknown topics are delivered too.
    pub topic: String,
    /// Request method.
    #[serde(default = "default_method")]
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Response status.
    #[serde(default)]
    pub status: Option<u16>,
    /// Opaque notification data.
    #[serde(default)]
    pub data: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl ReplayRecord {
    /// Parses one line.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Replay`] if the line is not a valid record.
    pub fn parse(line_no: usize, line: &str) -> Result<Self, MonitorError> {
        serde_json::from_str(line).map_err(|err| MonitorError::Replay {
            line: line_no,
            reason: err.to_string(),
        })
    }

    /// Builds the transaction handle delivered as the subject.
    #[must_use]
    pub fn transaction(&self) -> HttpTransaction {
        let tx = HttpTransaction::new(self.method.as_str(), self.url.as_str());
        match self.status {
            Some(status) => tx.with_status(status),
            None => tx,
        }
    }
}

/// Totals of a replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    /// Records delivered to the host channel.
    pub records: usize,
    /// Host observer invocations.
    pub notifications: usize,
}

/// Replays every record in `input` through `service`.
///
/// # Errors
///
/// Returns [`MonitorError::Replay`] on the first malformed or unreadable
/// line; records before it have already been delivered.
pub fn replay<R: BufRead>(
    input: R,
    service: &LocalNotificationService,
) -> Result<ReplaySummary, MonitorError> {
    let mut summary = ReplaySummary::default();
    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|err| MonitorError::Replay {
            line: line_no,
            reason: err.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = ReplayRecord::parse(line_no, &line)?;
        let tx = record.transaction();
        summary.notifications += service.notify_observers(&tx, &record.topic, record.data.as_deref());
        summary.records += 1;
        tracing::debug!(
            target: "httpmonitor::replay",
            line = line_no,
            topic = %record.topic,
            url = %record.url,
            "replayed"
        );
    }
    Ok(summary)
}
