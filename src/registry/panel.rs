//! Panel type capability.

use std::fmt;

/// A kind of panel that can be instantiated per context.
pub trait PanelType: fmt::Debug {
    /// Unique panel name, used as the lookup key in the registry.
    fn name(&self) -> &str;
}
