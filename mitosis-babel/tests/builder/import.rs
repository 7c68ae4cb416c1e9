//! Import tests (builder content → IR)

use super::{fixture, import_value};
use insta::assert_snapshot;
use mitosis_babel::builder_content_to_component;
use mitosis_babel::ir::{BindingType, MitosisNode};
use mitosis_babel::mappers::loops::{EACH_BINDING, LOOP_NODE};
use mitosis_babel::FormatError;
use serde_json::json;

const ELEMENT: &str = "@builder.io/sdk:Element";

fn single_block(element: serde_json::Value) -> MitosisNode {
    let component = import_value(&json!({"data": {"blocks": [element]}}));
    assert_eq!(component.children.len(), 1);
    component.children.into_iter().next().unwrap()
}

#[test]
fn test_style_merge_order() {
    let component = builder_content_to_component(&fixture("style_merge.json")).unwrap();
    let node = &component.children[0];

    assert_eq!(node.bindings.len(), 1);
    let style = &node.bindings["style"];
    assert_eq!(style.binding_type, BindingType::Expression);
    assert_snapshot!(style.code, @r###"{ fontSize: state.fontSize, background: "red", "@media (max-width: 640px)": { left: state.left, top: state.top }, "@media (max-width: 1200px)": { color: state.color, background: "green" }, }"###);
}

#[test]
fn test_no_style_content_means_no_style_binding() {
    let node = single_block(json!({"@type": ELEMENT, "tagName": "div", "responsiveStyles": {}}));
    assert!(node.bindings.get("style").is_none());
}

#[test]
fn test_medium_bucket_is_dropped() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "tagName": "div",
        "responsiveStyles": {"medium": {"color": "red"}, "large": {"display": "block"}}
    }));
    assert_eq!(node.bindings["style"].code, r#"{ display: "block", }"#);
}

#[test]
fn test_literal_large_entry_kept_beside_large_binding() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "tagName": "div",
        "bindings": {"responsiveStyles.large.color": "state.c"},
        "responsiveStyles": {"large": {"color": "blue", "display": "flex"}}
    }));
    assert_eq!(
        node.bindings["style"].code,
        r#"{ color: "blue", display: "flex", "@media (max-width: 1200px)": { color: state.c }, }"#
    );
}

#[test]
fn test_unknown_namespace_is_dropped() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "tagName": "div",
        "bindings": {"show": "state.visible", "hide": "state.hidden", "properties.title": "state.title"}
    }));
    assert_eq!(node.bindings.keys().collect::<Vec<_>>(), vec!["title"]);
}

#[test]
fn test_loop_default_naming() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "tagName": "li",
        "repeat": {"collection": "state.products"}
    }));

    assert_eq!(node.name, LOOP_NODE);
    assert_eq!(node.bindings[EACH_BINDING].code, "state.products");
    assert_eq!(node.scope.index_name.as_deref(), Some("index"));
    assert_eq!(node.scope.for_name.as_deref(), Some("productsItem"));
    assert_eq!(node.children.len(), 1);

    let body = &node.children[0];
    assert_eq!(body.name, "li");
    assert!(body.bindings.get(EACH_BINDING).is_none());
}

#[test]
fn test_loop_explicit_names() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "tagName": "li",
        "repeat": {"collection": "state.rows", "itemName": "row", "indexName": "i"}
    }));
    assert_eq!(node.scope.for_name.as_deref(), Some("row"));
    assert_eq!(node.scope.index_name.as_deref(), Some("i"));
}

#[test]
fn test_null_preservation() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "component": {"name": "Image", "options": {"image": null, "altText": "logo"}}
    }));
    assert_eq!(node.properties["image"], serde_json::Value::Null);
    assert_eq!(node.properties["altText"], json!("logo"));
}

#[test]
fn test_bound_option_wins_over_literal() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "component": {"name": "Text", "options": {"text": "static"}},
        "bindings": {"component.options.text": "state.text"}
    }));
    assert!(node.properties.get("text").is_none());
    assert_eq!(node.bindings["text"].code, "state.text");
}

#[test]
fn test_slots_are_not_children() {
    let component = builder_content_to_component(&fixture("slots.json")).unwrap();
    let card = &component.children[0];

    assert_eq!(card.name, "Card");
    let names: Vec<&str> = card.slots["actions"]
        .iter()
        .map(|node| node.name.as_str())
        .collect();
    assert_eq!(names, vec!["Core:Button", "Core:Button"]);
    assert_eq!(card.children.len(), 1);
    assert_eq!(card.children[0].name, "p");
    assert!(card.properties.get("actions").is_none());
}

#[test]
fn test_fragment_in_slot_stays_explicit() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "component": {"name": "Tabs", "options": {"content": [{
            "@type": ELEMENT,
            "component": {"name": "Core:Fragment", "options": {}},
            "children": [
                {"@type": ELEMENT, "tagName": "h2"},
                {"@type": ELEMENT, "tagName": "p"}
            ]
        }]}}
    }));

    let slot = &node.slots["content"];
    assert_eq!(slot.len(), 1);
    assert_eq!(slot[0].name, "Core:Fragment");
    assert_eq!(slot[0].children.len(), 2);
}

#[test]
fn test_mixed_slot_array_is_malformed() {
    let content = json!({"data": {"blocks": [{
        "@type": ELEMENT,
        "component": {"name": "Card", "options": {"actions": [
            {"@type": ELEMENT, "tagName": "button"},
            "not an element"
        ]}}
    }]}});

    let err = builder_content_to_component(&content.to_string()).unwrap_err();
    assert_eq!(
        err,
        FormatError::MalformedInput {
            path: "blocks[0].component.options.actions[1]".to_string(),
            reason: "expected a builder element".to_string(),
        }
    );
}

#[test]
fn test_malformed_path_points_into_children() {
    let content = json!({"data": {"blocks": [{
        "@type": ELEMENT,
        "tagName": "div",
        "children": [{
            "@type": ELEMENT,
            "component": {"name": "Columns", "options": {"columns": ["oops"]}}
        }]
    }]}});

    match builder_content_to_component(&content.to_string()) {
        Err(FormatError::MalformedInput { path, .. }) => {
            assert_eq!(path, "blocks[0].children[0].component.options.columns[0]")
        }
        other => panic!("Expected MalformedInput, got {other:?}"),
    }
}

#[test]
fn test_columns_become_column_children() {
    let component = builder_content_to_component(&fixture("columns.json")).unwrap();
    let columns = &component.children[0];

    assert_eq!(columns.name, "Columns");
    assert_eq!(columns.properties["space"], json!(20));
    assert_eq!(columns.children.len(), 2);
    assert!(columns.children[0].properties.get("width").is_none());
    assert!(columns.children[0].bindings.is_empty());
    assert_eq!(columns.children[1].properties["width"], json!(50));
    assert_eq!(columns.children[1].children[0].properties["text"], json!("Right"));
}

#[test]
fn test_personalization_variants_are_ordinary_nodes() {
    let component = builder_content_to_component(&fixture("personalization.json")).unwrap();
    let container = &component.children[0];

    assert_eq!(container.name, "PersonalizationContainer");
    assert_eq!(container.children.len(), 2);

    let sale = &container.children[0];
    assert_eq!(sale.name, "Variant");
    assert_eq!(sale.properties["name"], json!("Sale"));
    assert_eq!(sale.properties["query"][0]["value"], json!("/sale"));
    assert_eq!(sale.properties["startDate"], json!("2024-11-01T00:00:00.000Z"));
    assert_eq!(sale.children[0].properties["text"], json!("On sale"));

    let fallback = &container.children[1];
    assert_eq!(fallback.properties["default"], json!(""));
    assert_eq!(fallback.children[0].properties["text"], json!("Regular price"));
}

#[test]
fn test_component_code_and_inputs() {
    let component = builder_content_to_component(&fixture("code.json")).unwrap();

    assert_eq!(component.name, "Hero");
    assert_eq!(component.css_code(), Some(".hero { color: red; }"));
    assert_eq!(component.state["foo"].code, "'bar'");
    assert_eq!(component.state["count"].code, "0");
    assert_eq!(component.hooks.on_mount.as_deref(), Some("alert('hi');"));
    assert_eq!(component.inputs[0].name, "title");
    assert_eq!(component.inputs[0].default_value, Some(json!("Hello")));
}

#[test]
fn test_expression_marker_in_option() {
    let node = single_block(json!({
        "@type": ELEMENT,
        "component": {"name": "Text", "options": {"text": "{{ state.greeting }}"}}
    }));
    assert_eq!(node.bindings["text"].code, "state.greeting");
}
