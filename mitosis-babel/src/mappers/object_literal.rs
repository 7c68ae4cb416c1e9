//! Object-literal reading and printing.
//!
//! Style bindings, state hooks and variant queries all travel as JavaScript
//! object-literal source. This module reads that source with the TypeScript
//! grammar and splits objects into entries without evaluating anything.

use serde_json::{Map, Value};
use tree_sitter::{Node, Parser, Tree};

/// One member of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectEntry {
    /// `key: value` or the shorthand `key`, value kept as source.
    Property { key: String, value: String },
    /// `key: (..) => ..` or `key: function () {}`, value kept as source.
    Function { key: String, value: String },
    /// `key(args) { ... }`, kept as the whole member source.
    Method { key: String, source: String },
    /// `get key() { ... }`, kept as the whole member source.
    Getter { key: String, source: String },
    /// `...expression`
    Spread(String),
    /// Computed keys, setters and anything else we cannot name.
    Unsupported(String),
}

/// Parses TypeScript source. Returns `None` only when the grammar fails to load.
pub(crate) fn parse_typescript(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    if let Err(err) = parser.set_language(&tree_sitter_typescript::language_typescript()) {
        tracing::warn!(error = %err, "failed to load the TypeScript grammar");
        return None;
    }
    parser.parse(source, None)
}

pub(crate) fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Named children of `node`, comments excluded.
pub(crate) fn members(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let members = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    members
}

/// A lone expression, parsed inside parentheses so `{` opens an object.
struct Expression {
    source: String,
    tree: Tree,
}

impl Expression {
    fn parse(source: &str) -> Option<Self> {
        let source = format!("(\n{}\n)", source.trim());
        let tree = parse_typescript(&source)?;
        Some(Expression { source, tree })
    }

    /// The expression node, or `None` unless the source is exactly one
    /// error-free expression.
    fn node(&self) -> Option<Node<'_>> {
        let root = self.tree.root_node();
        if root.has_error() {
            return None;
        }
        let &[statement] = members(root).as_slice() else {
            return None;
        };
        let &[parenthesized] = members(statement).as_slice() else {
            return None;
        };
        if statement.kind() != "expression_statement"
            || parenthesized.kind() != "parenthesized_expression"
            || parenthesized.byte_range() != (0..self.source.len())
        {
            return None;
        }
        let &[inner] = members(parenthesized).as_slice() else {
            return None;
        };
        Some(inner)
    }
}

/// Splits an object literal into its entries.
///
/// Returns `None` when `source` is not a single well-formed `{ ... }`.
pub fn parse_object(source: &str) -> Option<Vec<ObjectEntry>> {
    let expression = Expression::parse(source)?;
    let node = expression.node()?;
    (node.kind() == "object").then(|| object_entries(node, &expression.source))
}

/// Reads the members of an `object` node found in `source`.
pub(crate) fn object_entries(object: Node<'_>, source: &str) -> Vec<ObjectEntry> {
    members(object)
        .into_iter()
        .map(|member| object_entry(member, source))
        .collect()
}

fn object_entry(member: Node<'_>, source: &str) -> ObjectEntry {
    let text = node_text(member, source).to_string();
    match member.kind() {
        "pair" => {
            let key = member
                .child_by_field_name("key")
                .and_then(|key| key_name(key, source));
            match (key, member.child_by_field_name("value")) {
                (Some(key), Some(value)) => {
                    let code = node_text(value, source).to_string();
                    if is_function(value) {
                        ObjectEntry::Function { key, value: code }
                    } else {
                        ObjectEntry::Property { key, value: code }
                    }
                }
                _ => ObjectEntry::Unsupported(text),
            }
        }
        "shorthand_property_identifier" => ObjectEntry::Property {
            key: text.clone(),
            value: text,
        },
        "method_definition" => {
            let key = member
                .child_by_field_name("name")
                .and_then(|name| key_name(name, source));
            match key {
                Some(_) if has_token(member, "set") => ObjectEntry::Unsupported(text),
                Some(key) if has_token(member, "get") => ObjectEntry::Getter { key, source: text },
                Some(key) => ObjectEntry::Method { key, source: text },
                None => ObjectEntry::Unsupported(text),
            }
        }
        "spread_element" => match members(member).first() {
            Some(argument) => ObjectEntry::Spread(node_text(*argument, source).to_string()),
            None => ObjectEntry::Unsupported(text),
        },
        _ => ObjectEntry::Unsupported(text),
    }
}

fn key_name(key: Node<'_>, source: &str) -> Option<String> {
    match key.kind() {
        "property_identifier" | "number" => Some(node_text(key, source).to_string()),
        "string" => string_value(key, source),
        _ => None,
    }
}

/// Whether `node` has an anonymous `token` child, such as `get` in a getter.
fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn is_function(value: Node<'_>) -> bool {
    matches!(
        value.kind(),
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// Renders `key: value` pairs as `{ a: 1, b: 2 }` (`{}` when empty).
pub fn render_object<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let members: Vec<String> = entries
        .into_iter()
        .map(|(key, value)| format!("{}: {}", render_key(key), value))
        .collect();
    if members.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", members.join(", "))
    }
}

/// Renders a key bare when it is an identifier, quoted otherwise.
pub fn render_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        serde_json::to_string(key).unwrap_or_else(|_| format!("\"{key}\""))
    }
}

/// Converts literal source (`'a'`, `50`, `[1, 2]`, `{ a: "b" }`) to JSON.
///
/// Anything that would need evaluation, identifiers included, yields `None`.
pub fn literal_value(source: &str) -> Option<Value> {
    let expression = Expression::parse(source)?;
    let node = expression.node()?;
    literal(node, &expression.source)
}

fn literal(node: Node<'_>, source: &str) -> Option<Value> {
    match node.kind() {
        "string" => string_value(node, source).map(Value::String),
        "number" => number_value(node_text(node, source)),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        "unary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            let argument = node.child_by_field_name("argument")?;
            if node_text(operator, source) != "-" || argument.kind() != "number" {
                return None;
            }
            number_value(&format!("-{}", node_text(argument, source)))
        }
        "parenthesized_expression" => match members(node).as_slice() {
            &[inner] => literal(inner, source),
            _ => None,
        },
        "array" => members(node)
            .into_iter()
            .map(|item| literal(item, source))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        "object" => {
            let mut map = Map::new();
            for member in members(node) {
                if member.kind() != "pair" {
                    return None;
                }
                let key = key_name(member.child_by_field_name("key")?, source)?;
                let value = literal(member.child_by_field_name("value")?, source)?;
                map.insert(key, value);
            }
            Some(Value::Object(map))
        }
        _ => None,
    }
}

fn number_value(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_number)
}

/// The decoded contents of a `string` node.
fn string_value(node: Node<'_>, source: &str) -> Option<String> {
    let mut value = String::new();
    for part in members(node) {
        let text = node_text(part, source);
        match part.kind() {
            "string_fragment" => value.push_str(text),
            "escape_sequence" => value.push_str(&unescape(text)?),
            _ => return None,
        }
    }
    Some(value)
}

fn unescape(sequence: &str) -> Option<String> {
    let mut chars = sequence.strip_prefix('\\')?.chars();
    let decoded = match chars.next()? {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0' => '\0',
        'x' | 'u' => {
            let hex: String = chars.filter(char::is_ascii_hexdigit).collect();
            char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
        }
        // line continuation
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => return Some(String::new()),
        other => other,
    };
    Some(decoded.to_string())
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
