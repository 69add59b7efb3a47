//! Per-page monitoring context.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a monitoring context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(uuid::Uuid);

impl ContextId {
    /// Creates a new random `ContextId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State carried over page reloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Saved panel state keyed by panel name.
    #[serde(default)]
    pub panel_state: HashMap<String, serde_json::Value>,
}

/// The page a set of panels is attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorContext {
    /// Context identifier.
    pub id: ContextId,
    /// URL of the monitored page.
    pub url: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// State persisted from before the last reload, if any.
    pub persisted_state: Option<PersistedState>,
}

impl MonitorContext {
    /// Creates a fresh context without persisted state.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: ContextId::new(),
            url: url.into(),
            created_at: Utc::now(),
            persisted_state: None,
        }
    }

    /// Attaches persisted state.
    #[must_use]
    pub fn with_persisted_state(mut self, state: PersistedState) -> Self {
        self.persisted_state = Some(state);
        self
    }

    /// Saved state of the named panel from before the last reload.
    #[must_use]
    pub fn panel_state(&self, panel_name: &str) -> Option<&serde_json::Value> {
        self.persisted_state
            .as_ref()
            .and_then(|state| state.panel_state.get(panel_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_has_no_panel_state() {
        let ctx = MonitorContext::new("https://example.com");
        assert!(ctx.panel_state("net").is_none());
    }

    #[test]
    fn panel_state_by_name() {
        let mut state = PersistedState::default();
        state
            .panel_state
            .insert("net".to_string(), serde_json::json!({ "scroll": 120 }));
        let ctx = MonitorContext::new("https://example.com").with_persisted_state(state);

        assert_eq!(ctx.panel_state("net"), Some(&serde_json::json!({ "scroll": 120 })));
        assert!(ctx.panel_state("cache").is_none());
    }
}
