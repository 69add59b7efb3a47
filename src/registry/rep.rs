//! Representation handlers and the per-candidate match outcome.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::domain::{MonitorContext, Value, ValueType};

/// A handler that claims the display of some kind of value.
pub trait Rep: fmt::Debug {
    /// CSS-style class name of the representation, used in diagnostics.
    fn class_name(&self) -> &str;

    /// Whether this rep handles `object`.
    ///
    /// # Errors
    ///
    /// An error means the predicate itself failed; the lookup treats it as
    /// "not supported" and moves on to the next rep.
    fn supports_object(
        &self,
        _object: &Value,
        _value_type: ValueType,
        _context: Option<&MonitorContext>,
    ) -> anyhow::Result<bool> {
        Ok(false)
    }
}

/// Outcome of asking one rep about one value.
#[derive(Debug)]
pub enum RepMatch {
    /// The predicate returned `true`.
    Supported,
    /// The predicate returned `false`.
    Unsupported,
    /// The predicate failed or panicked.
    Failed(anyhow::Error),
}

impl RepMatch {
    /// Runs `rep`'s predicate, folding errors and panics into
    /// [`RepMatch::Failed`].
    #[must_use]
    pub fn evaluate(
        rep: &dyn Rep,
        object: &Value,
        value_type: ValueType,
        context: Option<&MonitorContext>,
    ) -> Self {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            rep.supports_object(object, value_type, context)
        }));
        match outcome {
            Ok(Ok(true)) => Self::Supported,
            Ok(Ok(false)) => Self::Unsupported,
            Ok(Err(err)) => Self::Failed(err),
            Err(payload) => Self::Failed(anyhow::anyhow!(
                "supports_object panicked: {}",
                crate::net::panic_message(payload.as_ref())
            )),
        }
    }

    /// `true` for [`RepMatch::Supported`].
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }
}
