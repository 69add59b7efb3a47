//! Notification subjects and the HTTP transaction handle.
//!
//! The host hands every notification a subject of arbitrary shape. Only
//! subjects that expose an [`HttpChannel`] view are treated as network
//! transactions; everything else is ignored by the request observer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an observed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(uuid::Uuid);

impl RequestId {
    /// Creates a new random `RequestId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Any object the host passes as the subject of a notification.
pub trait NotificationSubject: fmt::Debug {
    /// Returns the network-transaction view of this subject, if it has one.
    fn as_http_channel(&self) -> Option<&dyn HttpChannel> {
        None
    }
}

/// Read access to a network transaction.
pub trait HttpChannel: fmt::Debug {
    /// Stable identifier of the transaction.
    fn request_id(&self) -> RequestId;

    /// Request method (`GET`, `POST`, ...).
    fn method(&self) -> &str;

    /// Full request URL.
    fn url(&self) -> &str;

    /// Response status, once known.
    fn response_status(&self) -> Option<u16> {
        None
    }
}

/// Plain HTTP transaction handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTransaction {
    /// Transaction identifier.
    pub id: RequestId,
    /// Request method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Response status, once received.
    pub status: Option<u16>,
    /// When the transaction was created.
    pub started_at: DateTime<Utc>,
}

impl HttpTransaction {
    /// Creates a transaction without a response.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            method: method.into(),
            url: url.into(),
            status: None,
            started_at: Utc::now(),
        }
    }

    /// Sets the response status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl NotificationSubject for HttpTransaction {
    fn as_http_channel(&self) -> Option<&dyn HttpChannel> {
        Some(self)
    }
}

impl HttpChannel for HttpTransaction {
    fn request_id(&self) -> RequestId {
        self.id
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn response_status(&self) -> Option<u16> {
        self.status
    }
}

/// Replaces the middle of `text` with `...`, keeping `limit / 2`
/// characters from each end. Texts within `limit` characters are returned
/// unchanged, so a cropped result is `limit + 3` characters at most.
#[must_use]
pub fn crop_string(text: &str, limit: usize) -> String {
    let len = text.chars().count();
    if len <= limit {
        return text.to_string();
    }
    let half = limit / 2;
    let head: String = text.chars().take(half).collect();
    let tail: String = text.chars().skip(len.saturating_sub(half)).collect();
    format!("{head}...{tail}")
}
