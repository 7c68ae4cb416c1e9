//! Builder content import
//!
//! Converts builder content JSON into the component IR. Every element becomes
//! one node (two for repeated elements: the loop wrapper and its body). The
//! binding namespaces, style buckets and directive options are handed to
//! their mappers; anything outside them is dropped.

use std::collections::HashSet;

use serde_json::{json, Value};

use super::bindings::{self, action_binding_name, PartitionedBindings};
use super::options::ImportOptions;
use super::schema::{BuilderContent, BuilderElement, BuilderInput};
use crate::error::FormatError;
use crate::ir::{classify, PropertyValue};
use crate::ir::nodes::{Binding, ComponentInput, MitosisComponent, MitosisNode};
use crate::mappers::slots::{self, OptionKind};
use crate::mappers::styles::{self, ResponsiveStyles, LITERAL_STYLES_META};
use crate::mappers::{columns, loops, personalization, state};

/// Node meta key holding the element `id`.
pub const META_ID: &str = "builderId";
/// Node meta key holding the element `@version`.
pub const META_VERSION: &str = "builderVersion";
pub const META_LAYER_NAME: &str = "layerName";
/// Node meta key listing which keys of a component came from `properties`.
pub const META_PROPERTIES: &str = "builderProperties";
/// Node meta key listing which bindings of a native tag came from
/// `component.options`.
pub const META_OPTIONS: &str = "builderOptions";
/// Node meta keys holding a `style` option or property. The IR `style`
/// binding is reserved for merged styles.
pub const META_STYLE_OPTION: &str = "styleOption";
pub const META_STYLE_PROPERTY: &str = "styleProperty";
/// Component meta key holding global CSS.
pub const META_CSS_CODE: &str = "cssCode";

const STYLE_KEY: &str = "style";

/// Parse builder content JSON into a component.
pub fn parse_from_builder(
    source: &str,
    options: &ImportOptions,
) -> Result<MitosisComponent, FormatError> {
    let value: Value =
        serde_json::from_str(source).map_err(|err| FormatError::ParseError(err.to_string()))?;
    let content: BuilderContent =
        serde_json::from_value(value).map_err(|err| FormatError::ParseError(err.to_string()))?;
    import_content(&content, options)
}

/// Import already-decoded builder content.
pub fn import_content(
    content: &BuilderContent,
    options: &ImportOptions,
) -> Result<MitosisComponent, FormatError> {
    let importer = Importer { options };
    let data = &content.data;

    let name = content
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(options.component_name.as_str());
    let mut component = MitosisComponent::new(name);

    let code = [data.ts_code.as_deref(), data.js_code.as_deref()]
        .into_iter()
        .flatten()
        .find(|code| !code.trim().is_empty());
    if let Some(code) = code {
        let (state, on_mount) = state::extract_state_hook(code);
        component.state = state;
        component.hooks.on_mount = on_mount;
    }

    component.inputs = data.inputs.iter().map(import_input).collect();
    if let Some(css) = data.css_code.as_ref().filter(|css| !css.is_empty()) {
        component
            .meta
            .insert(META_CSS_CODE.to_string(), Value::String(css.clone()));
    }
    component.children = importer.elements(&data.blocks, "blocks")?;

    tracing::debug!(
        component = %component.name,
        blocks = data.blocks.len(),
        state = component.state.len(),
        "imported builder content"
    );
    Ok(component)
}

fn import_input(input: &BuilderInput) -> ComponentInput {
    ComponentInput {
        name: input.name.clone(),
        default_value: input.default_value.clone(),
        meta: input.rest.clone(),
    }
}

struct Importer<'a> {
    options: &'a ImportOptions,
}

impl Importer<'_> {
    fn elements(
        &self,
        elements: &[BuilderElement],
        path: &str,
    ) -> Result<Vec<MitosisNode>, FormatError> {
        elements
            .iter()
            .enumerate()
            .map(|(i, element)| self.element(element, &format!("{path}[{i}]")))
            .collect()
    }

    fn element(&self, element: &BuilderElement, path: &str) -> Result<MitosisNode, FormatError> {
        let body = self.element_body(element, path)?;
        match element
            .repeat
            .as_ref()
            .filter(|repeat| !repeat.collection.trim().is_empty())
        {
            Some(repeat) => Ok(loops::wrap_in_loop(
                body,
                &repeat.collection,
                repeat.item_name.as_deref(),
                repeat.index_name.as_deref(),
            )),
            None => Ok(body),
        }
    }

    /// Imports an element, ignoring its repeat directive.
    fn element_body(
        &self,
        element: &BuilderElement,
        path: &str,
    ) -> Result<MitosisNode, FormatError> {
        let name = element
            .component_name()
            .or(element.tag_name.as_deref().filter(|tag| !tag.is_empty()))
            .unwrap_or(self.options.placeholder_tag.as_str());
        tracing::trace!(path = %path, name = %name, "importing element");
        let mut node = MitosisNode::new(name);

        if let Some(id) = &element.id {
            node.meta
                .insert(META_ID.to_string(), Value::String(id.clone()));
        }
        if let Some(version) = &element.version {
            node.meta.insert(META_VERSION.to_string(), version.clone());
        }
        if let Some(layer) = &element.layer_name {
            node.meta
                .insert(META_LAYER_NAME.to_string(), Value::String(layer.clone()));
        }

        let partitioned = bindings::partition(&element.bindings, &element.code.bindings);

        self.import_options(element, &partitioned, &mut node, path)?;
        import_properties(element, &partitioned, &mut node);
        record_tag_options(element, &partitioned, &mut node);
        import_actions(element, &partitioned, &mut node);
        import_style(element, &partitioned, &mut node);

        let children = self.elements(&element.children, &format!("{path}.children"))?;
        if node.name == personalization::CONTAINER {
            node.children
                .extend(personalization::default_variant_node(children));
        } else {
            node.children.extend(children);
        }
        Ok(node)
    }

    fn import_options(
        &self,
        element: &BuilderElement,
        partitioned: &PartitionedBindings,
        node: &mut MitosisNode,
        path: &str,
    ) -> Result<(), FormatError> {
        let mut structural = HashSet::new();
        let options = element
            .component
            .as_ref()
            .map(|component| &component.options);

        for (key, value) in options.into_iter().flatten() {
            let option_path = format!("{path}.component.options.{key}");

            if node.name == columns::COLUMNS && key == columns::COLUMNS_OPTION {
                for (i, group) in slots::decode_block_groups(value, &option_path)?
                    .iter()
                    .enumerate()
                {
                    let blocks =
                        self.elements(&group.blocks, &format!("{option_path}[{i}].blocks"))?;
                    node.children.push(columns::column_node(group, blocks));
                }
                structural.insert(key.as_str());
                continue;
            }
            if node.name == personalization::CONTAINER && key == personalization::VARIANTS_OPTION
            {
                for (i, group) in slots::decode_block_groups(value, &option_path)?
                    .iter()
                    .enumerate()
                {
                    let blocks =
                        self.elements(&group.blocks, &format!("{option_path}[{i}].blocks"))?;
                    node.children
                        .push(personalization::variant_node(group, blocks));
                }
                structural.insert(key.as_str());
                continue;
            }

            match slots::classify_option(value, &option_path)? {
                OptionKind::Slot(elements) => {
                    let nodes = self.elements(&elements, &option_path)?;
                    node.slots.insert(key.clone(), nodes);
                    structural.insert(key.as_str());
                }
                OptionKind::Value(value) => {
                    let bound = partitioned.options.get(key).map(String::as_str);
                    if let Some(value) = classify(Some(value), bound) {
                        apply_field(node, key, value, META_STYLE_OPTION);
                    }
                }
            }
        }

        for (key, code) in &partitioned.options {
            if structural.contains(key.as_str()) {
                tracing::debug!(key = %key, path = %path, "dropping binding shadowed by a slot");
                continue;
            }
            if options.is_some_and(|options| options.contains_key(key)) {
                continue;
            }
            if let Some(value) = classify(None, Some(code)) {
                apply_field(node, key, value, META_STYLE_OPTION);
            }
        }
        Ok(())
    }
}

fn import_properties(
    element: &BuilderElement,
    partitioned: &PartitionedBindings,
    node: &mut MitosisNode,
) {
    let literal = element.properties.as_ref();
    let mut keys: Vec<String> = Vec::new();

    for (key, value) in literal.into_iter().flatten() {
        let bound = partitioned.properties.get(key).map(String::as_str);
        if let Some(value) = classify(Some(value), bound) {
            if apply_field(node, key, value, META_STYLE_PROPERTY) {
                keys.push(key.clone());
            }
        }
    }
    for (key, code) in &partitioned.properties {
        if literal.is_some_and(|literal| literal.contains_key(key)) {
            continue;
        }
        if let Some(value) = classify(None, Some(code)) {
            if apply_field(node, key, value, META_STYLE_PROPERTY) {
                keys.push(key.clone());
            }
        }
    }

    if element.component_name().is_some() && !keys.is_empty() {
        keys.sort();
        keys.dedup();
        node.meta.insert(
            META_PROPERTIES.to_string(),
            Value::Array(keys.into_iter().map(Value::String).collect()),
        );
    }
}

/// Stores a classified option or property on `node`. A `style` key goes to
/// `style_meta` instead, so it never meets the merged style binding.
/// Returns whether the value landed among the node's fields.
fn apply_field(node: &mut MitosisNode, key: &str, value: PropertyValue, style_meta: &str) -> bool {
    if key != STYLE_KEY {
        value.apply(node, key);
        return true;
    }
    tracing::debug!(meta = %style_meta, "keeping style field in node meta");
    let stored = match value {
        PropertyValue::Literal(value) => json!({ "value": value }),
        PropertyValue::Bound(binding) => json!({ "code": binding.code }),
    };
    node.meta.insert(style_meta.to_string(), stored);
    false
}

/// Lists in meta `builderOptions` the `component.options` bindings a native
/// tag kept.
fn record_tag_options(
    element: &BuilderElement,
    partitioned: &PartitionedBindings,
    node: &mut MitosisNode,
) {
    if !node.is_tag() {
        return;
    }
    let overridden = |key: &str| {
        partitioned.properties.contains_key(key)
            || element
                .properties
                .as_ref()
                .is_some_and(|properties| properties.contains_key(key))
    };
    let keys: Vec<Value> = partitioned
        .options
        .keys()
        .map(String::as_str)
        .filter(|key| *key != STYLE_KEY && node.bindings.contains_key(*key) && !overridden(key))
        .map(|key| Value::String(key.to_string()))
        .collect();
    if !keys.is_empty() {
        node.meta.insert(META_OPTIONS.to_string(), Value::Array(keys));
    }
}

fn import_actions(
    element: &BuilderElement,
    partitioned: &PartitionedBindings,
    node: &mut MitosisNode,
) {
    let mut actions = partitioned.actions.clone();
    for (event, code) in bindings::prefer(&element.actions, &element.code.actions) {
        actions.insert(event.to_string(), code.to_string());
    }
    for (event, code) in actions {
        if code.trim().is_empty() || event.is_empty() {
            continue;
        }
        node.set_binding(action_binding_name(&event), Binding::expression(code));
    }
}

fn import_style(
    element: &BuilderElement,
    partitioned: &PartitionedBindings,
    node: &mut MitosisNode,
) {
    let empty = ResponsiveStyles::new();
    let literal = element.responsive_styles.as_ref().unwrap_or(&empty);
    if let Some(merged) = styles::merge_styles(literal, &partitioned.styles) {
        node.set_binding("style", Binding::expression(merged.code));
        node.meta
            .insert(LITERAL_STYLES_META.to_string(), merged.literal_styles);
    }
}
