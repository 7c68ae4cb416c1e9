//! Personalization container ⇄ `Variant` children.
//!
//! Variants import as ordinary nodes: their query, name and date-range fields
//! are copied verbatim into literal properties and their blocks become
//! children. Nothing is lowered into conditionals. The container's own
//! children are the default content and import into a trailing default
//! variant.

use serde_json::{Map, Value};

use crate::ir::nodes::MitosisNode;

use super::literal_fields;
use super::slots::BlockGroup;

pub const CONTAINER: &str = "PersonalizationContainer";
pub const VARIANT: &str = "Variant";
/// Option holding the variant list.
pub const VARIANTS_OPTION: &str = "variants";
/// Property marking the variant that holds default content.
pub const DEFAULT_PROPERTY: &str = "default";

pub fn variant_node(group: &BlockGroup, children: Vec<MitosisNode>) -> MitosisNode {
    let mut node = MitosisNode::new(VARIANT).with_children(children);
    for (key, value) in &group.fields {
        node.set_property(key.clone(), value.clone());
    }
    node
}

/// Default variant for the container's own children, if there are any.
pub fn default_variant_node(children: Vec<MitosisNode>) -> Option<MitosisNode> {
    if children.is_empty() {
        return None;
    }
    let mut node = MitosisNode::new(VARIANT).with_children(children);
    node.set_property(DEFAULT_PROPERTY, Value::String(String::new()));
    Some(node)
}

pub fn is_default_variant(node: &MitosisNode) -> bool {
    node.name == VARIANT && node.properties.contains_key(DEFAULT_PROPERTY)
}

/// Splits container children into targeted variants and default content.
///
/// Default content is the children of default variants plus any child that
/// is not a variant, in tree order.
pub fn partition_children(children: &[MitosisNode]) -> (Vec<&MitosisNode>, Vec<&MitosisNode>) {
    let mut variants = Vec::new();
    let mut defaults = Vec::new();
    for child in children {
        if is_default_variant(child) {
            defaults.extend(child.children.iter());
        } else if child.name == VARIANT {
            variants.push(child);
        } else {
            defaults.push(child);
        }
    }
    (variants, defaults)
}

/// Variant entry for a `Variant` node whose children were already exported.
pub fn variant_entry(node: &MitosisNode, blocks: Vec<Value>) -> Value {
    let mut entry: Map<String, Value> = literal_fields(node);
    entry.insert("blocks".to_string(), Value::Array(blocks));
    Value::Object(entry)
}
