//! Monitor configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use crate::error::MonitorError;

/// Top-level monitor configuration.
///
/// Loaded once at startup via [`MonitorConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub log_json: bool,

    /// Maximum length of request names shown in diagnostics.
    pub string_crop_length: usize,

    /// Number of entries the built-in traffic log keeps.
    pub traffic_log_capacity: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_json: false,
            string_crop_length: 50,
            traffic_log_capacity: 1_000,
        }
    }
}

impl MonitorConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set or cannot be parsed.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Config`] if a limit is set to zero.
    pub fn from_env() -> Result<Self, MonitorError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            log_filter: std::env::var("HTTPMONITOR_LOG").unwrap_or(defaults.log_filter),
            log_json: parse_env_bool("HTTPMONITOR_LOG_JSON", defaults.log_json),
            string_crop_length: parse_env(
                "HTTPMONITOR_STRING_CROP_LENGTH",
                defaults.string_crop_length,
            ),
            traffic_log_capacity: parse_env(
                "HTTPMONITOR_TRAFFIC_LOG_CAPACITY",
                defaults.traffic_log_capacity,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.string_crop_length == 0 {
            return Err(MonitorError::Config(
                "HTTPMONITOR_STRING_CROP_LENGTH must be greater than zero".to_string(),
            ));
        }
        if self.traffic_log_capacity == 0 {
            return Err(MonitorError::Config(
                "HTTPMONITOR_TRAFFIC_LOG_CAPACITY must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
