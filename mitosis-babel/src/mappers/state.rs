//! State hook ⇄ component state.
//!
//! Builder content keeps component state as code: `useState({ ... })` (or
//! `useStore`) in `tsCode`, `Object.assign(state, { ... })` in `jsCode`.
//! Whatever surrounds the hook call is the mount hook.

use std::ops::Range;

use indexmap::IndexMap;
use tree_sitter::Node;

use crate::ir::nodes::{StateKind, StateValue};

use super::object_literal::{self, node_text, ObjectEntry};

const HOOKS: [&str; 2] = ["useState", "useStore"];

/// Splits custom code into declared state and the remaining mount code.
pub fn extract_state_hook(code: &str) -> (IndexMap<String, StateValue>, Option<String>) {
    let Some(tree) = object_literal::parse_typescript(code) else {
        return (IndexMap::new(), non_empty(code));
    };
    let Some(hook) = find_hook(tree.root_node(), code) else {
        return (IndexMap::new(), non_empty(code));
    };

    let entries = match hook.object {
        Some(object) if !object.has_error() => object_literal::object_entries(object, code),
        _ => {
            tracing::debug!(
                call = %code.get(hook.span.clone()).unwrap_or_default(),
                "state hook argument is not an object literal"
            );
            Vec::new()
        }
    };
    let mut state = IndexMap::new();
    for entry in entries {
        let (key, source, kind) = match entry {
            ObjectEntry::Property { key, value } => (key, value, StateKind::Property),
            ObjectEntry::Function { key, value } => (key, value, StateKind::Function),
            ObjectEntry::Method { key, source } => (key, source, StateKind::Method),
            ObjectEntry::Getter { key, source } => (key, source, StateKind::Getter),
            other => {
                tracing::debug!(entry = ?other, "dropping unsupported state entry");
                continue;
            }
        };
        state.insert(key, StateValue { code: source, kind });
    }

    let before = code.get(..hook.span.start).unwrap_or_default();
    let after = code.get(hook.span.end..).unwrap_or_default();
    let rest = format!("{}\n{}", before.trim(), after.trim());
    (state, non_empty(&rest))
}

/// Renders `tsCode`: `useState({ ... });` followed by the mount code.
pub fn render_ts_code(
    state: &IndexMap<String, StateValue>,
    on_mount: Option<&str>,
) -> Option<String> {
    render(state, on_mount, |object| format!("useState({object});"))
}

/// Renders `jsCode`: `Object.assign(state, { ... });` followed by the mount code.
pub fn render_js_code(
    state: &IndexMap<String, StateValue>,
    on_mount: Option<&str>,
) -> Option<String> {
    render(state, on_mount, |object| format!("Object.assign(state, {object});"))
}

fn render(
    state: &IndexMap<String, StateValue>,
    on_mount: Option<&str>,
    hook: impl Fn(&str) -> String,
) -> Option<String> {
    let mut parts = Vec::new();
    if !state.is_empty() {
        parts.push(hook(&render_state_object(state)));
    }
    if let Some(code) = on_mount.and_then(non_empty) {
        parts.push(code);
    }
    (!parts.is_empty()).then(|| parts.join("\n"))
}

fn render_state_object(state: &IndexMap<String, StateValue>) -> String {
    let members: Vec<String> = state
        .iter()
        .map(|(key, value)| match value.kind {
            StateKind::Method | StateKind::Getter => value.code.clone(),
            StateKind::Property | StateKind::Function => {
                format!("{}: {}", object_literal::render_key(key), value.code)
            }
        })
        .collect();
    if members.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", members.join(", "))
    }
}

struct HookCall<'tree> {
    /// Bytes cut from the code: the whole statement when the call is one.
    span: Range<usize>,
    object: Option<Node<'tree>>,
}

/// Finds the first hook call in document order.
fn find_hook<'tree>(node: Node<'tree>, code: &str) -> Option<HookCall<'tree>> {
    if node.kind() == "call_expression" {
        if let Some(object) = hook_argument(node, code) {
            let span = match node.parent() {
                Some(parent) if parent.kind() == "expression_statement" => parent.byte_range(),
                _ => node.byte_range(),
            };
            return Some(HookCall { span, object });
        }
    }
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find_map(|child| find_hook(child, code));
    found
}

/// For a hook call, its object argument if it has one. `None` for any other call.
fn hook_argument<'tree>(call: Node<'tree>, code: &str) -> Option<Option<Node<'tree>>> {
    let function = call.child_by_field_name("function")?;
    let arguments = object_literal::members(call.child_by_field_name("arguments")?);
    let object = if HOOKS.contains(&node_text(function, code)) {
        arguments.first()
    } else if is_object_assign(function, code) {
        match arguments.as_slice() {
            [target, object, ..] if node_text(*target, code) == "state" => Some(object),
            _ => return None,
        }
    } else {
        return None;
    };
    Some(object.copied().filter(|node| node.kind() == "object"))
}

fn is_object_assign(function: Node<'_>, code: &str) -> bool {
    function.kind() == "member_expression"
        && function
            .child_by_field_name("object")
            .is_some_and(|object| node_text(object, code) == "Object")
        && function
            .child_by_field_name("property")
            .is_some_and(|property| node_text(property, code) == "assign")
}

fn non_empty(code: &str) -> Option<String> {
    let code = code.trim();
    (!code.is_empty()).then(|| code.to_string())
}
