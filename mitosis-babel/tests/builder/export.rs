//! Export tests (IR → builder content)

use mitosis_babel::formats::builder::serializer::export_component;
use mitosis_babel::ir::{Binding, MitosisComponent, MitosisNode};
use mitosis_babel::mappers::columns::COLUMN;
use mitosis_babel::mappers::loops::wrap_in_loop;
use mitosis_babel::{component_to_builder, ExportOptions};
use serde_json::{json, Value};

fn export_blocks(children: Vec<MitosisNode>) -> Vec<Value> {
    let mut component = MitosisComponent::new("MyComponent");
    component.children = children;
    let content = export_component(&component, &ExportOptions::default()).unwrap();
    content
        .data
        .blocks
        .into_iter()
        .map(|element| serde_json::to_value(element).unwrap())
        .collect()
}

#[test]
fn test_hover_selector_is_dropped_with_siblings_kept() {
    let mut node = MitosisNode::new("div");
    node.set_binding(
        "style",
        Binding::expression(
            r#"{ fontSize: state.size, "&:hover": { color: "red", fontSize: state.big }, }"#,
        ),
    );

    let blocks = export_blocks(vec![node]);
    assert_eq!(blocks[0]["bindings"], json!({"style.fontSize": "state.size"}));
    assert!(blocks[0].get("responsiveStyles").is_none());
}

#[test]
fn test_arbitrary_media_query_is_dropped() {
    let mut node = MitosisNode::new("div");
    node.set_binding(
        "style",
        Binding::expression(
            r#"{ "@media (max-width: 991px)": { color: state.color }, "@media (max-width: 640px)": { color: state.small } }"#,
        ),
    );

    let blocks = export_blocks(vec![node]);
    assert_eq!(
        blocks[0]["bindings"],
        json!({"responsiveStyles.small.color": "state.small"})
    );
}

#[test]
fn test_hand_written_style_literals_export_as_responsive_styles() {
    let mut node = MitosisNode::new("div");
    node.set_binding(
        "style",
        Binding::expression("{ padding: '10px', color: state.color }"),
    );

    let blocks = export_blocks(vec![node]);
    assert_eq!(blocks[0]["responsiveStyles"], json!({"large": {"padding": "10px"}}));
    assert_eq!(blocks[0]["bindings"], json!({"style.color": "state.color"}));
}

#[test]
fn test_literal_width_round_trip_shape() {
    let mut first = MitosisNode::new(COLUMN);
    first.children.push(MitosisNode::new("p"));
    let mut second = MitosisNode::new(COLUMN);
    second.set_property("width", json!(50));
    let columns = MitosisNode::new("Columns").with_children(vec![first, second]);

    let blocks = export_blocks(vec![columns]);
    let entries = &blocks[0]["component"]["options"]["columns"];
    assert!(entries[0].get("width").is_none());
    assert_eq!(entries[0]["blocks"][0]["tagName"], json!("p"));
    assert_eq!(entries[1]["width"], json!(50));
    assert_eq!(blocks[0]["bindings"], json!({}));
    assert_eq!(blocks[0]["children"], json!([]));
}

#[test]
fn test_absent_values_produce_no_expressions() {
    let node = MitosisNode::new("Text");
    let blocks = export_blocks(vec![node]);

    assert_eq!(blocks[0]["component"], json!({"name": "Text", "options": {}}));
    assert_eq!(blocks[0]["bindings"], json!({}));
}

#[test]
fn test_loop_unwraps_into_repeat() {
    let body = MitosisNode::new("li");
    let wrapper = wrap_in_loop(body, "state.products", None, Some("i"));

    let blocks = export_blocks(vec![wrapper]);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["tagName"], json!("li"));
    assert_eq!(
        blocks[0]["repeat"],
        json!({"collection": "state.products", "indexName": "i"})
    );
}

#[test]
fn test_every_element_carries_structural_defaults() {
    let tree = MitosisNode::new("div").with_children(vec![MitosisNode::new("Text")]);
    let blocks = export_blocks(vec![tree]);

    for element in [&blocks[0], &blocks[0]["children"][0]] {
        assert_eq!(element["actions"], json!({}));
        assert_eq!(element["bindings"], json!({}));
        assert_eq!(element["code"], json!({"actions": {}, "bindings": {}}));
        assert!(element["children"].is_array());
    }
    assert_eq!(blocks[0]["children"][0]["children"], json!([]));
}

#[test]
fn test_pretty_output_is_valid_json() {
    let component = MitosisComponent::new("Card");
    let output = component_to_builder(&component).unwrap();

    assert!(output.contains('\n'));
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["name"], json!("Card"));
}
