//! Builder content export
//!
//! Converts the component IR back into builder content, inverting every rule
//! the importer applies. Exported elements always carry the structural
//! defaults (`actions`, `bindings`, `code`, `children`) even when empty. IR
//! shapes the schema cannot express (spread bindings, nested style
//! selectors, dynamic column fields) are dropped, never emitted malformed.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::bindings::{event_name, Namespace};
use super::options::{ExportOptions, DEFAULT_COMPONENT_NAME};
use super::parser::{
    META_ID, META_LAYER_NAME, META_OPTIONS, META_PROPERTIES, META_STYLE_OPTION,
    META_STYLE_PROPERTY, META_VERSION,
};
use super::schema::{
    BuilderComponent, BuilderContent, BuilderData, BuilderElement, BuilderInput, BuilderRepeat,
};
use crate::error::FormatError;
use crate::ir::nodes::{ComponentInput, MitosisComponent, MitosisNode};
use crate::mappers::styles::{self, LITERAL_STYLES_META};
use crate::mappers::{columns, loops, personalization, slots, state};

/// Serialize a component to builder content JSON.
pub fn serialize_to_builder(
    component: &MitosisComponent,
    options: &ExportOptions,
) -> Result<String, FormatError> {
    let content = export_component(component, options)?;
    let result = if options.pretty {
        serde_json::to_string_pretty(&content)
    } else {
        serde_json::to_string(&content)
    };
    result.map_err(|err| FormatError::SerializationError(err.to_string()))
}

/// Export a component into builder content.
pub fn export_component(
    component: &MitosisComponent,
    options: &ExportOptions,
) -> Result<BuilderContent, FormatError> {
    let empty = || options.emit_empty_code.then(String::new);
    let on_mount = component.hooks.on_mount.as_deref();

    let data = BuilderData {
        css_code: component.css_code().map(str::to_string),
        js_code: state::render_js_code(&component.state, on_mount).or_else(empty),
        ts_code: state::render_ts_code(&component.state, on_mount).or_else(empty),
        inputs: component.inputs.iter().map(export_input).collect(),
        blocks: export_nodes(&component.children)?,
    };
    let name = (!component.name.is_empty() && component.name != DEFAULT_COMPONENT_NAME)
        .then(|| component.name.clone());

    tracing::debug!(
        component = %component.name,
        blocks = data.blocks.len(),
        "exported builder content"
    );
    Ok(BuilderContent { name, data })
}

fn export_input(input: &ComponentInput) -> BuilderInput {
    BuilderInput {
        name: input.name.clone(),
        default_value: input.default_value.clone(),
        rest: input.meta.clone(),
    }
}

fn export_nodes(nodes: &[MitosisNode]) -> Result<Vec<BuilderElement>, FormatError> {
    nodes.iter().map(export_node).collect()
}

fn export_node(node: &MitosisNode) -> Result<BuilderElement, FormatError> {
    match loops::unwrap_loop(node) {
        Some(parts) => {
            let mut element = match node.children.as_slice() {
                [child] => {
                    let body = export_node(child)?;
                    if body.repeat.is_some() {
                        slots::fragment_element(vec![body])
                    } else {
                        body
                    }
                }
                children => slots::fragment_element(export_nodes(children)?),
            };
            element.repeat = Some(BuilderRepeat {
                collection: parts.collection.to_string(),
                item_name: parts.item_name.map(str::to_string),
                index_name: parts.index_name.map(str::to_string),
            });
            Ok(element)
        }
        None => export_element(node),
    }
}

fn export_element(node: &MitosisNode) -> Result<BuilderElement, FormatError> {
    tracing::trace!(node = %node.name, "exporting node");
    let is_tag = node.is_tag();
    let listed = meta_keys(node, META_PROPERTIES);
    let tag_options = meta_keys(node, META_OPTIONS);
    let is_property =
        |key: &str| (is_tag && !tag_options.contains(key)) || listed.contains(key);

    let mut element = BuilderElement {
        id: node.meta_str(META_ID).map(str::to_string),
        version: node.meta.get(META_VERSION).cloned(),
        layer_name: node.meta_str(META_LAYER_NAME).map(str::to_string),
        ..Default::default()
    };

    let mut properties = IndexMap::new();
    let mut options = IndexMap::new();
    for (key, value) in &node.properties {
        if is_property(key) {
            properties.insert(key.clone(), value.clone());
        } else {
            options.insert(key.clone(), value.clone());
        }
    }

    restore_style_field(
        node.meta.get(META_STYLE_OPTION),
        Namespace::ComponentOptions,
        &mut options,
        &mut element.bindings,
    );
    restore_style_field(
        node.meta.get(META_STYLE_PROPERTY),
        Namespace::Properties,
        &mut properties,
        &mut element.bindings,
    );

    for (name, nodes) in &node.slots {
        if is_tag {
            tracing::debug!(tag = %node.name, slot = %name, "dropping slot on a native tag");
            continue;
        }
        options.insert(name.clone(), Value::Array(export_values(nodes)?));
    }

    for (key, binding) in &node.bindings {
        if key == "style" {
            let split = styles::split_style(&binding.code, node.meta.get(LITERAL_STYLES_META));
            element.bindings.extend(split.bindings);
            if !split.literal.is_empty() {
                element.responsive_styles = Some(split.literal);
            }
        } else if node.slots.contains_key(key) {
            tracing::debug!(key = %key, "dropping binding shadowed by a slot");
        } else if binding.is_spread() {
            tracing::debug!(key = %key, "dropping spread binding");
        } else if let Some(event) = event_name(key) {
            element.actions.insert(event, binding.code.clone());
        } else if is_property(key) {
            element
                .bindings
                .insert(Namespace::Properties.path(key), binding.code.clone());
        } else {
            element
                .bindings
                .insert(Namespace::ComponentOptions.path(key), binding.code.clone());
        }
    }

    let children: Vec<&MitosisNode> = if node.name == columns::COLUMNS {
        let (column_nodes, rest): (Vec<&MitosisNode>, Vec<&MitosisNode>) = node
            .children
            .iter()
            .partition(|child| child.name == columns::COLUMN);
        if !column_nodes.is_empty() {
            let entries = column_nodes
                .into_iter()
                .map(|column| Ok(columns::column_entry(column, export_values(&column.children)?)))
                .collect::<Result<Vec<_>, FormatError>>()?;
            options.insert(columns::COLUMNS_OPTION.to_string(), Value::Array(entries));
        }
        rest
    } else if node.name == personalization::CONTAINER {
        let (variants, defaults) = personalization::partition_children(&node.children);
        if !variants.is_empty() {
            let entries = variants
                .into_iter()
                .map(|variant| {
                    Ok(personalization::variant_entry(
                        variant,
                        export_values(&variant.children)?,
                    ))
                })
                .collect::<Result<Vec<_>, FormatError>>()?;
            options.insert(
                personalization::VARIANTS_OPTION.to_string(),
                Value::Array(entries),
            );
        }
        defaults
    } else {
        node.children.iter().collect()
    };
    element.children = children
        .into_iter()
        .map(export_node)
        .collect::<Result<_, _>>()?;

    if is_tag {
        element.tag_name = Some(node.name.clone());
        element.properties = Some(properties);
    } else {
        element.component = Some(BuilderComponent {
            name: node.name.clone(),
            options,
        });
        element.properties = (!properties.is_empty()).then_some(properties);
    }
    Ok(element)
}

fn meta_keys<'a>(node: &'a MitosisNode, key: &str) -> HashSet<&'a str> {
    node.meta
        .get(key)
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Puts a `style` option or property kept in node meta back in its namespace.
fn restore_style_field(
    stored: Option<&Value>,
    namespace: Namespace,
    literal: &mut IndexMap<String, Value>,
    bindings: &mut IndexMap<String, String>,
) {
    let Some(stored) = stored else {
        return;
    };
    if let Some(code) = stored.get("code").and_then(Value::as_str) {
        bindings.insert(namespace.path("style"), code.to_string());
    } else if let Some(value) = stored.get("value") {
        literal.insert("style".to_string(), value.clone());
    }
}

/// Exports nodes as raw JSON, for arrays nested in component options.
fn export_values(nodes: &[MitosisNode]) -> Result<Vec<Value>, FormatError> {
    export_nodes(nodes)?
        .into_iter()
        .map(|element| {
            serde_json::to_value(element)
                .map_err(|err| FormatError::SerializationError(err.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Binding, BindingKind};
    use serde_json::json;

    fn export(children: Vec<MitosisNode>) -> Value {
        let mut component = MitosisComponent::new(DEFAULT_COMPONENT_NAME);
        component.children = children;
        let content = export_component(&component, &ExportOptions::default()).unwrap();
        serde_json::to_value(content).unwrap()
    }

    #[test]
    fn test_tag_carries_structural_defaults() {
        let value = export(vec![MitosisNode::new("div")]);
        assert_eq!(
            value["data"]["blocks"][0],
            json!({
                "@type": "@builder.io/sdk:Element",
                "tagName": "div",
                "properties": {},
                "bindings": {},
                "code": {"actions": {}, "bindings": {}},
                "actions": {},
                "children": []
            })
        );
    }

    #[test]
    fn test_empty_code_fields() {
        let value = export(vec![]);
        assert_eq!(
            value["data"],
            json!({"jsCode": "", "tsCode": "", "blocks": []})
        );

        let options = ExportOptions {
            emit_empty_code: false,
            pretty: false,
        };
        let content = export_component(&MitosisComponent::new("Card"), &options).unwrap();
        assert_eq!(
            serde_json::to_value(content).unwrap(),
            json!({"name": "Card", "data": {"blocks": []}})
        );
    }

    #[test]
    fn test_component_bindings_route_by_kind() {
        let mut node = MitosisNode::new("Button");
        node.set_property("text", json!("Go"));
        node.set_binding("link", Binding::expression("state.url"));
        node.set_binding("onClick", Binding::expression("state.go()"));
        node.set_binding(
            "rest",
            Binding {
                kind: BindingKind::Spread,
                ..Binding::expression("props")
            },
        );

        let value = export(vec![node]);
        let element = &value["data"]["blocks"][0];
        assert_eq!(
            element["component"],
            json!({"name": "Button", "options": {"text": "Go"}})
        );
        assert_eq!(
            element["bindings"],
            json!({"component.options.link": "state.url"})
        );
        assert_eq!(element["actions"], json!({"click": "state.go()"}));
        assert!(element.get("properties").is_none());
    }

    #[test]
    fn test_loop_with_several_children_wraps_in_fragment() {
        let mut wrapper =
            loops::wrap_in_loop(MitosisNode::new("p"), "state.items", Some("row"), None);
        wrapper.children.push(MitosisNode::new("hr"));

        let value = export(vec![wrapper]);
        let element = &value["data"]["blocks"][0];
        assert_eq!(element["component"]["name"], json!(slots::FRAGMENT));
        assert_eq!(
            element["repeat"],
            json!({"collection": "state.items", "itemName": "row"})
        );
        assert_eq!(element["children"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_slot_shadows_binding() {
        let mut node = MitosisNode::new("Tabs");
        node.slots
            .insert("content".to_string(), vec![MitosisNode::new("p")]);
        node.bindings
            .insert("content".to_string(), Binding::expression("state.x"));

        let value = export(vec![node]);
        let element = &value["data"]["blocks"][0];
        assert_eq!(element["bindings"], json!({}));
        assert_eq!(
            element["component"]["options"]["content"][0]["tagName"],
            json!("p")
        );
    }

    #[test]
    fn test_style_fields_return_to_their_namespace() {
        let mut card = MitosisNode::new("Card");
        card.meta
            .insert(META_STYLE_OPTION.to_string(), json!({"value": "compact"}));
        card.set_binding("style", Binding::expression("{ color: state.color, }"));
        let mut div = MitosisNode::new("div");
        div.meta
            .insert(META_STYLE_PROPERTY.to_string(), json!({"code": "state.css"}));

        let value = export(vec![card, div]);
        let blocks = &value["data"]["blocks"];
        assert_eq!(
            blocks[0]["component"],
            json!({"name": "Card", "options": {"style": "compact"}})
        );
        assert_eq!(blocks[0]["bindings"], json!({"style.color": "state.color"}));
        assert_eq!(blocks[1]["bindings"], json!({"properties.style": "state.css"}));
    }

    #[test]
    fn test_tag_option_bindings_keep_their_namespace() {
        let mut node = MitosisNode::new("input");
        node.set_binding("label", Binding::expression("state.label"));
        node.set_binding("value", Binding::expression("state.value"));
        node.meta.insert(META_OPTIONS.to_string(), json!(["label"]));

        let value = export(vec![node]);
        assert_eq!(
            value["data"]["blocks"][0]["bindings"],
            json!({
                "component.options.label": "state.label",
                "properties.value": "state.value"
            })
        );
    }
}
