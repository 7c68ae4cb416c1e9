//! Structural checks run on trees handed back by plugins.

use crate::error::FormatError;
use crate::mappers::loops;

use super::nodes::{MitosisComponent, MitosisNode};

/// Checks the invariants every transform relies on.
///
/// - a key is either a literal property or a binding, never both
/// - a loop wrapper carries its `each` binding
pub fn validate(component: &MitosisComponent) -> Result<(), FormatError> {
    for (i, node) in component.children.iter().enumerate() {
        validate_node(node, &format!("children[{i}]"))?;
    }
    Ok(())
}

fn validate_node(node: &MitosisNode, path: &str) -> Result<(), FormatError> {
    if let Some(key) = node
        .properties
        .keys()
        .find(|key| node.bindings.contains_key(*key))
    {
        return Err(FormatError::malformed(
            path,
            format!("'{key}' is both a literal property and a binding"),
        ));
    }

    if node.name == loops::LOOP_NODE && !node.bindings.contains_key(loops::EACH_BINDING) {
        return Err(FormatError::malformed(
            path,
            "loop wrapper has no 'each' binding",
        ));
    }

    for (i, child) in node.children.iter().enumerate() {
        validate_node(child, &format!("{path}.children[{i}]"))?;
    }
    for (slot, nodes) in &node.slots {
        for (i, child) in nodes.iter().enumerate() {
            validate_node(child, &format!("{path}.slots.{slot}[{i}]"))?;
        }
    }
    Ok(())
}
