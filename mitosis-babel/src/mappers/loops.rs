//! Repeat ⇄ loop-wrapper mapping.
//!
//! A builder element with `repeat.collection` becomes a `For` node whose
//! `each` binding holds the collection and whose scope names the loop
//! variables. The repeated element itself is the wrapper's only child.

use crate::ir::nodes::{Binding, MitosisNode, Scope};

/// Name of the loop wrapper node.
pub const LOOP_NODE: &str = "For";
/// Binding on the wrapper holding the collection expression.
pub const EACH_BINDING: &str = "each";
pub const DEFAULT_INDEX_NAME: &str = "index";

/// Default loop variable for `collection`: the last path segment plus `Item`.
///
/// `state.products` gives `productsItem`; a collection with no usable
/// segment gives `item`.
pub fn default_item_name(collection: &str) -> String {
    let segment = collection
        .rsplit('.')
        .next()
        .map(|segment| segment.trim())
        .filter(|segment| super::object_literal::is_identifier(segment));
    match segment {
        Some(segment) => format!("{segment}Item"),
        None => "item".to_string(),
    }
}

/// Wraps `body` in a loop over `collection`.
pub fn wrap_in_loop(
    body: MitosisNode,
    collection: &str,
    item_name: Option<&str>,
    index_name: Option<&str>,
) -> MitosisNode {
    let mut wrapper = MitosisNode::new(LOOP_NODE);
    wrapper.set_binding(EACH_BINDING, Binding::expression(collection));
    wrapper.scope = Scope {
        for_name: Some(
            item_name
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| default_item_name(collection)),
        ),
        index_name: Some(
            index_name
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_INDEX_NAME)
                .to_string(),
        ),
    };
    wrapper.children.push(body);
    wrapper
}

/// The parts of a loop wrapper the exporter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopParts<'a> {
    pub collection: &'a str,
    /// Set only when it differs from the default for the collection.
    pub item_name: Option<&'a str>,
    /// Set only when it differs from `index`.
    pub index_name: Option<&'a str>,
}

/// Recognizes a loop wrapper and returns its collection and loop names.
pub fn unwrap_loop(node: &MitosisNode) -> Option<LoopParts<'_>> {
    if node.name != LOOP_NODE {
        return None;
    }
    let collection = node.bindings.get(EACH_BINDING)?.code.as_str();
    let default_item = default_item_name(collection);
    Some(LoopParts {
        collection,
        item_name: node
            .scope
            .for_name
            .as_deref()
            .filter(|name| *name != default_item),
        index_name: node
            .scope
            .index_name
            .as_deref()
            .filter(|name| *name != DEFAULT_INDEX_NAME),
    })
}
