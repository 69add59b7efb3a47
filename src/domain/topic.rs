//! Host notification topics handled by the request observer.

use std::fmt;

use serde::Serialize;

/// The only topic accepted by [`crate::net::HttpRequestObserver::add_observer`]
/// and [`crate::net::HttpRequestObserver::remove_observer`].
pub const HTTP_EVENT: &str = "http-event";

/// HTTP lifecycle event class emitted by the host network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HttpTopic {
    /// A request is about to be sent; headers may still be modified.
    #[serde(rename = "http-on-modify-request")]
    ModifyRequest,
    /// Response headers arrived from the network.
    #[serde(rename = "http-on-examine-response")]
    ExamineResponse,
    /// Response served from the cache.
    #[serde(rename = "http-on-examine-cached-response")]
    ExamineCachedResponse,
}

impl HttpTopic {
    /// All topics, in the order they are subscribed on the host channel.
    pub const ALL: [Self; 3] = [
        Self::ModifyRequest,
        Self::ExamineResponse,
        Self::ExamineCachedResponse,
    ];

    /// Host-level topic name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ModifyRequest => "http-on-modify-request",
            Self::ExamineResponse => "http-on-examine-response",
            Self::ExamineCachedResponse => "http-on-examine-cached-response",
        }
    }

    /// Maps a raw host topic to an [`HttpTopic`]; `None` for anything else.
    #[must_use]
    pub fn from_topic(topic: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == topic)
    }
}

impl fmt::Display for HttpTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
