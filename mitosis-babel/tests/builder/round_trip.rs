//! Round trip tests
//!
//! Export(Import(C)) must reproduce the fixtures exactly, and
//! Import(Export(Import(C))) must equal Import(C) for generated content.

use super::{fixture, import_value};
use mitosis_babel::{builder_content_to_component, component_to_builder};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const ELEMENT: &str = "@builder.io/sdk:Element";

fn assert_round_trip(name: &str) {
    let source = fixture(name);
    let original: Value = serde_json::from_str(&source).unwrap();

    let component = builder_content_to_component(&source).unwrap();
    let exported: Value =
        serde_json::from_str(&component_to_builder(&component).unwrap()).unwrap();

    assert_eq!(exported, original, "round trip changed {name}");
}

/// Wraps one fully-defaulted element in content and checks it survives a round trip.
fn assert_block_round_trip(block: Value) {
    let content = json!({"data": {"jsCode": "", "tsCode": "", "blocks": [block]}});
    let component = import_value(&content);
    let exported: Value =
        serde_json::from_str(&component_to_builder(&component).unwrap()).unwrap();

    assert_eq!(exported, content);
}

#[test]
fn test_round_trip_style_merge() {
    assert_round_trip("style_merge.json");
}

#[test]
fn test_round_trip_responsive_literals() {
    assert_round_trip("responsive_literals.json");
}

#[test]
fn test_round_trip_columns() {
    assert_round_trip("columns.json");
}

#[test]
fn test_round_trip_slots() {
    assert_round_trip("slots.json");
}

#[test]
fn test_round_trip_loop() {
    assert_round_trip("loop.json");
}

#[test]
fn test_round_trip_personalization() {
    assert_round_trip("personalization.json");
}

#[test]
fn test_round_trip_code() {
    assert_round_trip("code.json");
}

#[test]
fn test_round_trip_adds_structural_defaults() {
    let sparse = json!({"data": {"blocks": [{"@type": ELEMENT, "tagName": "span"}]}});
    let component = import_value(&sparse);
    let exported: Value = serde_json::from_str(&component_to_builder(&component).unwrap()).unwrap();

    assert_eq!(
        exported["data"]["blocks"][0],
        json!({
            "@type": ELEMENT,
            "tagName": "span",
            "properties": {},
            "bindings": {},
            "code": {"actions": {}, "bindings": {}},
            "actions": {},
            "children": []
        })
    );
}

#[test]
fn test_round_trip_literal_and_bound_large_entry() {
    assert_block_round_trip(json!({
        "@type": ELEMENT,
        "tagName": "div",
        "properties": {},
        "bindings": {"responsiveStyles.large.color": "state.c"},
        "responsiveStyles": {"large": {"color": "blue", "display": "flex"}},
        "code": {"actions": {}, "bindings": {}},
        "actions": {},
        "children": []
    }));
}

#[test]
fn test_round_trip_style_option_beside_style_content() {
    assert_block_round_trip(json!({
        "@type": ELEMENT,
        "component": {"name": "Card", "options": {"style": "compact"}},
        "bindings": {"responsiveStyles.large.color": "state.c"},
        "responsiveStyles": {"large": {"display": "flex"}},
        "code": {"actions": {}, "bindings": {}},
        "actions": {},
        "children": []
    }));
}

#[test]
fn test_round_trip_tag_option_bindings() {
    assert_block_round_trip(json!({
        "@type": ELEMENT,
        "tagName": "input",
        "properties": {"type": "text"},
        "bindings": {
            "component.options.label": "state.label",
            "properties.value": "state.value"
        },
        "code": {"actions": {}, "bindings": {}},
        "actions": {},
        "children": []
    }));
}

// ============================================================================
// GENERATED CONTENT
// ============================================================================

const TAGS: &[&str] = &["div", "span", "li"];
const COMPONENTS: &[&str] = &["Text", "Core:Button", "Card"];
const BINDING_PATHS: &[&str] = &[
    "style.color",
    "style.fontSize",
    "responsiveStyles.small.left",
    "responsiveStyles.large.top",
    "component.options.label",
    "properties.href",
    "actions.click",
    "show",
];
const CODES: &[&str] = &["state.a", "state.b", "\"red\"", "props.size"];

fn string_map(
    keys: &'static [&'static str],
    values: Vec<Value>,
) -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(prop::sample::select(keys), prop::sample::select(values), 0..3)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect()
        })
}

fn bindings() -> impl Strategy<Value = Map<String, Value>> {
    string_map(BINDING_PATHS, CODES.iter().map(|code| json!(code)).collect())
}

fn options() -> impl Strategy<Value = Map<String, Value>> {
    string_map(
        &["text", "count", "image", "style"],
        vec![json!("hi"), json!(""), Value::Null, json!(1), json!([1, 2])],
    )
}

fn properties() -> impl Strategy<Value = Map<String, Value>> {
    string_map(&["title", "data-id"], vec![json!("x"), json!("y")])
}

fn responsive_styles() -> impl Strategy<Value = Option<Value>> {
    prop::option::of(prop::sample::select(vec![
        json!({"large": {"display": "flex"}}),
        json!({"large": {"display": "flex", "top": "0"}, "small": {"width": "10px"}}),
        json!({"medium": {"color": "blue"}}),
    ]))
}

fn repeat() -> impl Strategy<Value = Option<Value>> {
    prop::option::of(prop::sample::select(vec![
        json!({"collection": "state.items"}),
        json!({"collection": "props.list", "indexName": "i"}),
        json!({"collection": "state.rows", "itemName": "row"}),
    ]))
}

fn element(depth: u32) -> BoxedStrategy<Value> {
    let children = if depth == 0 {
        Just(Vec::new()).boxed()
    } else {
        prop::collection::vec(element(depth - 1), 0..3).boxed()
    };
    let name = prop_oneof![
        prop::sample::select(TAGS).prop_map(|tag| (true, tag)),
        prop::sample::select(COMPONENTS).prop_map(|name| (false, name)),
    ];

    (
        name,
        bindings(),
        options(),
        properties(),
        responsive_styles(),
        repeat(),
        children,
    )
        .prop_map(
            |((is_tag, name), bindings, options, properties, styles, repeat, children)| {
                let mut element = json!({
                    "@type": ELEMENT,
                    "bindings": bindings,
                    "children": children,
                });
                if is_tag {
                    element["tagName"] = json!(name);
                } else {
                    element["component"] = json!({"name": name, "options": options});
                }
                if !properties.is_empty() {
                    element["properties"] = Value::Object(properties);
                }
                if let Some(styles) = styles {
                    element["responsiveStyles"] = styles;
                }
                if let Some(repeat) = repeat {
                    element["repeat"] = repeat;
                }
                element
            },
        )
        .boxed()
}

fn content() -> impl Strategy<Value = Value> {
    (
        prop::option::of(prop::sample::select(vec!["Hero", "MyComponent"])),
        prop::option::of(prop::sample::select(vec![
            "useState({ a: 1 });",
            "useState({ a: 1, b: 'x' }); run();",
            "track();",
        ])),
        prop::collection::vec(element(2), 0..3),
    )
        .prop_map(|(name, ts_code, blocks)| {
            let mut content = json!({"data": {"blocks": blocks}});
            if let Some(name) = name {
                content["name"] = json!(name);
            }
            if let Some(code) = ts_code {
                content["data"]["tsCode"] = json!(code);
            }
            content
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn import_is_stable_through_export(content in content()) {
        let first = import_value(&content);
        let exported = component_to_builder(&first).unwrap();
        let second = builder_content_to_component(&exported).unwrap();
        prop_assert_eq!(first, second);
    }
}
