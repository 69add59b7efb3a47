//! Capabilities of registered modules and UI listeners.

use std::fmt;

use crate::domain::{MonitorContext, Value};

/// A pluggable subsystem announced to the [`super::Registry`].
///
/// All hooks are optional; the defaults do nothing.
pub trait Module: fmt::Debug {
    /// Name used in diagnostics.
    fn dispatch_name(&self) -> &str;

    /// Called once the registry is initialized, or right away for modules
    /// registered after that point.
    ///
    /// # Errors
    ///
    /// A failure is fatal to the module's feature and is propagated to
    /// whoever triggered the initialization.
    fn initialize(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called on dynamic unregistration and on registry shutdown.
    ///
    /// # Errors
    ///
    /// Failures are logged by the registry and otherwise ignored.
    fn shutdown(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Resolves `url` to an object this module knows about.
    fn get_object_by_url(&self, _context: &MonitorContext, _url: &str) -> Option<Value> {
        None
    }
}

/// Opaque UI listener, kept in registration order.
pub trait UiListener: fmt::Debug {
    /// Name used in diagnostics.
    fn dispatch_name(&self) -> &str;
}
