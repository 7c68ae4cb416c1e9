//! Literal vs. binding classification of incoming property values.

use serde_json::Value;

use super::nodes::{Binding, MitosisNode};

/// The outcome of classifying one property path.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Literal(Value),
    Bound(Binding),
}

impl PropertyValue {
    /// Stores the value on `node`, as a property or a binding.
    pub fn apply(self, node: &mut MitosisNode, key: impl Into<String>) {
        match self {
            PropertyValue::Literal(value) => node.set_property(key, value),
            PropertyValue::Bound(binding) => node.set_binding(key, binding),
        }
    }
}

/// Classifies the value found at one property path.
///
/// A bound expression always wins. Otherwise the raw value is a literal unless
/// it is a string made only of a `{{ expression }}` marker, which becomes a
/// binding on the inner expression. Returns `None` when the path carries
/// neither a value nor a usable expression.
pub fn classify(raw: Option<&Value>, bound: Option<&str>) -> Option<PropertyValue> {
    if let Some(code) = bound.filter(|code| !code.trim().is_empty()) {
        return Some(PropertyValue::Bound(Binding::expression(code)));
    }

    let raw = raw?;
    if let Some(expression) = raw.as_str().and_then(embedded_expression) {
        return Some(PropertyValue::Bound(Binding::expression(expression)));
    }
    Some(PropertyValue::Literal(raw.clone()))
}

/// Extracts `expr` from a string of the form `{{ expr }}`.
fn embedded_expression(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix("{{")?.strip_suffix("}}")?;
    // `{{a}} and {{b}}` is an interpolated string, not a single marker
    if inner.contains("{{") || inner.contains("}}") {
        return None;
    }
    let inner = inner.trim();
    (!inner.is_empty()).then_some(inner)
}
