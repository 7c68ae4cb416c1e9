//! Slot and fragment mapping.
//!
//! An element array under `component.options.<key>` is a named slot. The
//! array is all-or-nothing: once one member is an element, every member must
//! be, otherwise the input is malformed. Fragment wrappers inside a slot are
//! kept as explicit nodes so several children can share one option.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::FormatError;
use crate::formats::builder::schema::{is_element, BuilderComponent, BuilderElement};

/// Component name the exporter uses for synthesized fragments.
pub const FRAGMENT: &str = "Core:Fragment";

pub fn is_fragment(name: &str) -> bool {
    matches!(name, "Fragment" | "Core:Fragment")
}

/// How one component option imports.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionKind<'a> {
    /// An array of builder elements, imported as a named slot.
    Slot(Vec<BuilderElement>),
    /// Anything else, imported as a property.
    Value(&'a Value),
}

/// Decides whether an option value is a slot. `path` locates the option in
/// the input for error reporting.
pub fn classify_option<'a>(value: &'a Value, path: &str) -> Result<OptionKind<'a>, FormatError> {
    let Some(items) = value.as_array() else {
        return Ok(OptionKind::Value(value));
    };
    if !items.iter().any(is_element) {
        return Ok(OptionKind::Value(value));
    }
    decode_elements(items, path).map(OptionKind::Slot)
}

/// Decodes an array that must hold only elements.
pub fn decode_elements(items: &[Value], path: &str) -> Result<Vec<BuilderElement>, FormatError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{path}[{i}]");
            if !is_element(item) {
                return Err(FormatError::malformed(item_path, "expected a builder element"));
            }
            serde_json::from_value(item.clone())
                .map_err(|err| FormatError::malformed(item_path, err.to_string()))
        })
        .collect()
}

/// An entry of a `columns` or `variants` option: plain fields plus `blocks`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGroup {
    pub fields: IndexMap<String, Value>,
    pub blocks: Vec<BuilderElement>,
}

/// Decodes an array of `{ blocks: [...], ...fields }` objects.
pub fn decode_block_groups(value: &Value, path: &str) -> Result<Vec<BlockGroup>, FormatError> {
    let Some(items) = value.as_array() else {
        return Err(FormatError::malformed(path, "expected an array"));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item_path = format!("{path}[{i}]");
            let Some(object) = item.as_object() else {
                return Err(FormatError::malformed(item_path, "expected an object"));
            };
            let mut fields = IndexMap::new();
            let mut blocks = Vec::new();
            for (key, field) in object {
                if key != "blocks" {
                    fields.insert(key.clone(), field.clone());
                    continue;
                }
                let Some(items) = field.as_array() else {
                    return Err(FormatError::malformed(
                        format!("{item_path}.blocks"),
                        "expected an array",
                    ));
                };
                blocks = decode_elements(items, &format!("{item_path}.blocks"))?;
            }
            Ok(BlockGroup { fields, blocks })
        })
        .collect()
}

/// Wraps several elements in one fragment element.
pub fn fragment_element(children: Vec<BuilderElement>) -> BuilderElement {
    BuilderElement {
        component: Some(BuilderComponent {
            name: FRAGMENT.to_string(),
            options: IndexMap::new(),
        }),
        children,
        ..Default::default()
    }
}
