//! Central registry of modules, panel types, reps and UI listeners.
//!
//! [`Registry`] is owned by the application object and passed explicitly to
//! whoever needs it. All lists keep registration order and compare entries
//! by instance. The registry has two readiness states: while
//! [`Readiness::Pending`], panel registrations are buffered; the first
//! [`Registry::initialize`] flushes the buffer and is irreversible.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use super::{Module, PanelType, Rep, RepMatch, UiListener};
use crate::domain::{MonitorContext, Value, ValueType};
use crate::error::MonitorError;
use crate::identity::remove_instance;

const TARGET: &str = "httpmonitor::registration";

/// Lifecycle phase of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    /// Not yet initialized; panel registrations are buffered.
    #[default]
    Pending,
    /// Initialized; registrations apply immediately.
    Initialized,
}

/// Registry of pluggable subsystems.
///
/// # Ordering
///
/// - Modules, UI listeners and reps are kept in registration order.
/// - Panel types registered before initialization precede those
///   registered afterwards, keeping relative order within each phase.
#[derive(Debug)]
pub struct Registry {
    modules: Vec<Rc<dyn Module>>,
    ui_listeners: Vec<Rc<dyn UiListener>>,
    panel_types: Vec<Rc<dyn PanelType>>,
    early_panel_types: Option<Vec<Rc<dyn PanelType>>>,
    panel_type_map: HashMap<String, Rc<dyn PanelType>>,
    reps: Vec<Rc<dyn Rep>>,
    default_rep: Option<Rc<dyn Rep>>,
    default_func_rep: Option<Rc<dyn Rep>>,
    current_context: Option<Rc<MonitorContext>>,
    readiness: Readiness,
    shut_down: bool,
}

impl Registry {
    /// Creates an empty, pending registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            ui_listeners: Vec::new(),
            panel_types: Vec::new(),
            early_panel_types: Some(Vec::new()),
            panel_type_map: HashMap::new(),
            reps: Vec::new(),
            default_rep: None,
            default_func_rep: None,
            current_context: None,
            readiness: Readiness::Pending,
            shut_down: false,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// `true` once [`Registry::shutdown`] has started.
    #[must_use]
    pub const fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    /// Moves the registry to [`Readiness::Initialized`].
    ///
    /// Buffered panel types are appended to the panel list, then every
    /// module registered so far receives `initialize`. Calling this again
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::ModuleInitialize`] for the first module whose
    /// hook fails; later modules are not initialized.
    pub fn initialize(&mut self) -> Result<(), MonitorError> {
        if self.readiness == Readiness::Initialized {
            debug!(target: TARGET, "registry already initialized");
            return Ok(());
        }

        if let Some(early) = self.early_panel_types.take() {
            debug!(target: TARGET, count = early.len(), "flushing early panel registrations");
            self.panel_types.extend(early);
        }
        self.readiness = Readiness::Initialized;

        let modules = self.modules.clone();
        dispatch_initialize(&modules)
    }

    /// Dispatches `shutdown` to every registered module. Afterwards,
    /// unregistering a module no longer dispatches `shutdown` to it.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        let modules = self.modules.clone();
        dispatch_shutdown(&modules);
    }

    // ── Registration ───────────────────────────────────────────────────────

    /// Appends modules. Once initialized, each new module receives
    /// `initialize` right away.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::ModuleInitialize`] if a new module's hook
    /// fails. The modules stay registered.
    pub fn register_module<I>(&mut self, modules: I) -> Result<(), MonitorError>
    where
        I: IntoIterator<Item = Rc<dyn Module>>,
    {
        let added: Vec<Rc<dyn Module>> = modules.into_iter().collect();
        for module in &added {
            debug!(target: TARGET, module = module.dispatch_name(), "registerModule");
        }
        self.modules.extend(added.iter().map(Rc::clone));

        if self.readiness == Readiness::Initialized {
            dispatch_initialize(&added)?;
        }
        Ok(())
    }

    /// Removes modules by instance. Unless the registry is shutting down,
    /// each given module receives `shutdown`.
    pub fn unregister_module<I>(&mut self, modules: I)
    where
        I: IntoIterator<Item = Rc<dyn Module>>,
    {
        let removed: Vec<Rc<dyn Module>> = modules.into_iter().collect();
        for module in &removed {
            if !remove_instance(&mut self.modules, module) {
                debug!(target: TARGET, module = module.dispatch_name(), "unregisterModule; not registered");
            }
        }

        if !self.shut_down {
            dispatch_shutdown(&removed);
        }
    }

    /// Appends UI listeners.
    pub fn register_ui_listener<I>(&mut self, listeners: I)
    where
        I: IntoIterator<Item = Rc<dyn UiListener>>,
    {
        self.ui_listeners.extend(listeners);
    }

    /// Removes UI listeners by instance.
    pub fn unregister_ui_listener<I>(&mut self, listeners: I)
    where
        I: IntoIterator<Item = Rc<dyn UiListener>>,
    {
        for listener in listeners {
            remove_instance(&mut self.ui_listeners, &listener);
        }
    }

    /// Registers panel types, buffering them while pending. The name index
    /// is updated immediately; the last registration for a name wins.
    pub fn register_panel<I>(&mut self, types: I)
    where
        I: IntoIterator<Item = Rc<dyn PanelType>>,
    {
        for panel_type in types {
            debug!(target: TARGET, panel = panel_type.name(), "registerPanel");
            self.panel_type_map
                .insert(panel_type.name().to_string(), Rc::clone(&panel_type));
            match self.early_panel_types.as_mut() {
                Some(early) => early.push(panel_type),
                None => self.panel_types.push(panel_type),
            }
        }
    }

    /// Appends reps.
    pub fn register_rep<I>(&mut self, reps: I)
    where
        I: IntoIterator<Item = Rc<dyn Rep>>,
    {
        self.reps.extend(reps);
    }

    /// Removes reps by instance.
    pub fn unregister_rep<I>(&mut self, reps: I)
    where
        I: IntoIterator<Item = Rc<dyn Rep>>,
    {
        for rep in reps {
            remove_instance(&mut self.reps, &rep);
        }
    }

    /// Sets the fallbacks used when no registered rep matches.
    pub fn set_default_reps(&mut self, func_rep: Rc<dyn Rep>, rep: Rc<dyn Rep>) {
        self.default_func_rep = Some(func_rep);
        self.default_rep = Some(rep);
    }

    /// Sets the context used by [`Registry::get_rep`] when the caller
    /// passes none.
    pub fn set_current_context(&mut self, context: Option<Rc<MonitorContext>>) {
        self.current_context = context;
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    /// Registered modules, in order.
    #[must_use]
    pub fn modules(&self) -> &[Rc<dyn Module>] {
        &self.modules
    }

    /// Registered UI listeners, in order.
    #[must_use]
    pub fn ui_listeners(&self) -> &[Rc<dyn UiListener>] {
        &self.ui_listeners
    }

    /// Active panel types, in order. Empty until initialization flushes
    /// the early registrations.
    #[must_use]
    pub fn panel_types(&self) -> &[Rc<dyn PanelType>] {
        &self.panel_types
    }

    /// Registered reps, in order.
    #[must_use]
    pub fn reps(&self) -> &[Rc<dyn Rep>] {
        &self.reps
    }

    /// Context used when a lookup is given none.
    #[must_use]
    pub fn current_context(&self) -> Option<&Rc<MonitorContext>> {
        self.current_context.as_ref()
    }

    // ── Lookups ────────────────────────────────────────────────────────────

    /// Panel type registered under `name`.
    #[must_use]
    pub fn get_panel_type(&self, name: &str) -> Option<Rc<dyn PanelType>> {
        self.panel_type_map.get(name).map(Rc::clone)
    }

    /// State of `panel_name` persisted in `context` across reloads.
    #[must_use]
    pub fn get_panel_state<'a>(
        &self,
        context: &'a MonitorContext,
        panel_name: &str,
    ) -> Option<&'a serde_json::Value> {
        context.panel_state(panel_name)
    }

    /// Asks each module in order to resolve `url`; the first non-null
    /// answer wins.
    #[must_use]
    pub fn get_object_by_url(&self, context: &MonitorContext, url: &str) -> Option<Value> {
        self.modules.iter().find_map(|module| {
            module
                .get_object_by_url(context, url)
                .filter(|object| !object.is_nullish())
        })
    }

    /// First registered rep whose predicate accepts `object`.
    ///
    /// A predicate that fails counts as "not supported" and the scan goes
    /// on. Without a match, the default function rep is returned for
    /// callables and the default rep for everything else.
    #[must_use]
    pub fn get_rep(
        &self,
        object: &Value,
        context: Option<&MonitorContext>,
    ) -> Option<Rc<dyn Rep>> {
        let value_type = object.type_of();
        let context = context.or(self.current_context.as_deref());

        for (index, rep) in self.reps.iter().enumerate() {
            match RepMatch::evaluate(rep.as_ref(), object, value_type, context) {
                RepMatch::Supported => return Some(Rc::clone(rep)),
                RepMatch::Unsupported => {}
                RepMatch::Failed(err) => {
                    warn!(
                        target: "httpmonitor::rep",
                        rep = rep.class_name(),
                        index,
                        total = self.reps.len(),
                        error = %err,
                        "getRep; supports_object failed"
                    );
                }
            }
        }

        let fallback = if value_type == ValueType::Function {
            &self.default_func_rep
        } else {
            &self.default_rep
        };
        fallback.as_ref().map(Rc::clone)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch_initialize(modules: &[Rc<dyn Module>]) -> Result<(), MonitorError> {
    for module in modules {
        module
            .initialize()
            .map_err(|err| MonitorError::ModuleInitialize {
                name: module.dispatch_name().to_string(),
                source: err.into(),
            })?;
    }
    Ok(())
}

fn dispatch_shutdown(modules: &[Rc<dyn Module>]) {
    for module in modules {
        if let Err(err) = module.shutdown() {
            warn!(target: TARGET, module = module.dispatch_name(), error = %err, "shutdown failed");
        }
    }
}
