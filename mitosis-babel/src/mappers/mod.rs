//! Directive mappers.
//!
//! Each mapper is a set of pure rules for one concept that the builder
//! schema and the IR express differently. The importer and the exporter
//! call the same mapper in opposite directions, so both halves of a rule
//! live next to each other and are tested together.
//!
//! - styles: `style.*` and `responsiveStyles` ⇄ one `style` binding
//! - loops: `repeat` ⇄ `For` wrapper
//! - slots: element arrays in options ⇄ named slots, fragments
//! - columns: `options.columns` ⇄ `Column` children
//! - personalization: `options.variants` ⇄ `Variant` children
//! - state: custom-code state hook ⇄ component state
//!
//! `object_literal` holds the object-literal reader they share.

pub mod columns;
pub mod loops;
pub mod object_literal;
pub mod personalization;
pub mod slots;
pub mod state;
pub mod styles;

use serde_json::{Map, Value};

use crate::ir::nodes::MitosisNode;

/// Literal view of a node's attributes.
///
/// Properties are copied as they are. Bindings whose source is a plain
/// literal are folded back to their value; dynamic ones cannot be expressed
/// as data and are dropped.
pub(crate) fn literal_fields(node: &MitosisNode) -> Map<String, Value> {
    let mut fields: Map<String, Value> = node
        .properties
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    for (key, binding) in &node.bindings {
        match object_literal::literal_value(&binding.code) {
            Some(value) => {
                fields.insert(key.clone(), value);
            }
            None => tracing::debug!(
                node = %node.name,
                key = %key,
                "dropping dynamic binding that has no literal form"
            ),
        }
    }
    fields
}
