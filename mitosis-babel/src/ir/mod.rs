//! Intermediate Representation (IR) for Mitosis components.
//!
//! This module defines the format-agnostic component tree that the builder
//! importer produces, the exporter consumes and code generators read.

pub mod classify;
pub mod nodes;
pub mod validate;

pub use classify::{classify, PropertyValue};
pub use nodes::{
    Binding, BindingKind, BindingType, ComponentInput, Hooks, MitosisComponent, MitosisNode,
    Scope, StateKind, StateValue,
};
pub use validate::validate;
