//! # httpmonitor
//!
//! HTTP request observation and fan-out dispatch for a browser network
//! monitor.
//!
//! The host network layer accepts only a handful of observers, so this
//! crate registers exactly one ([`net::HttpRequestObserver`]) and
//! multiplexes it onto any number of listeners. Around it, a
//! [`registry::Registry`] collects the pluggable modules, panel types and
//! representation handlers of the monitor and broadcasts their lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! Host network channel (NotificationService)
//!     │  http-on-modify-request / examine-response / examine-cached-response
//!     ▼
//! HttpRequestObserver (net/)  ── subscribe while ≥ 1 listener
//!     │  fan-out, registration order, failures isolated
//!     ├── TrafficLog (net/)
//!     └── external listeners (panels, caches, viewers)
//!
//! HttpMonitor (app)
//!     ├── Registry (registry/) ── modules, panels, reps, UI listeners
//!     └── HttpRequestObserver
//! ```
//!
//! Everything runs on one thread; shared state uses `Rc` and `RefCell`.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod net;
pub mod registry;
pub mod replay;
