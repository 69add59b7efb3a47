//! Monitor error types.
//!
//! [`MonitorError`] is the central error type of the crate. Only contract
//! violations and fatal-to-feature failures surface here; listener failures
//! during fan-out are isolated and logged instead of returned.

/// Boxed error carried by variants that wrap foreign hook failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category            |
/// |-----------|---------------------|
/// | 1000–1999 | Contract violation  |
/// | 2000–2999 | Module lifecycle    |
/// | 3000–3999 | Configuration/input |
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// A topic other than `"http-event"` was passed to the request observer.
    #[error("invalid argument: unsupported observer topic {topic:?}")]
    InvalidArgument {
        /// The rejected topic string.
        topic: String,
    },

    /// A module's `initialize` hook failed.
    #[error("module {name} failed to initialize: {source}")]
    ModuleInitialize {
        /// Dispatch name of the failing module.
        name: String,
        /// Error returned by the hook.
        #[source]
        source: BoxError,
    },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// A replay record could not be parsed.
    #[error("invalid replay record on line {line}: {reason}")]
    Replay {
        /// 1-based line number in the replay input.
        line: usize,
        /// Parser message.
        reason: String,
    },
}

impl MonitorError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidArgument { .. } => 1001,
            Self::ModuleInitialize { .. } => 2001,
            Self::Config(_) => 3001,
            Self::Replay { .. } => 3002,
        }
    }

    /// Returns `true` for errors caused by a collaborator breaking the API
    /// contract (programming errors, not runtime conditions).
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
