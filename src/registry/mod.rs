//! Module registry: plugin registration and lifecycle broadcast.
//!
//! Subsystems announce themselves to a [`Registry`] through capability
//! traits ([`Module`], [`PanelType`], [`Rep`], [`UiListener`]). The registry
//! keeps them in registration order, broadcasts lifecycle events and
//! answers first-match lookups. Tree lookups over UI nodes live in
//! [`tree`].

pub mod module;
pub mod module_registry;
pub mod panel;
pub mod rep;
pub mod tree;

pub use module::{Module, UiListener};
pub use module_registry::{Readiness, Registry};
pub use panel::PanelType;
pub use rep::{Rep, RepMatch};
pub use tree::{
    REP_IGNORE_CLASS, REP_TARGET_CLASS, UiTree, get_element_by_rep_object, get_element_panel,
    get_rep_node, get_rep_object,
};
