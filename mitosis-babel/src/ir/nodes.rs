//! Core data structures for the Intermediate Representation (IR).
//!
//! Every kind of node (plain element, loop wrapper, fragment, personalization
//! variant) is a [`MitosisNode`]; kinds are told apart by `name` and `meta`,
//! so adding a kind only needs a new mapper rule in [`crate::mappers`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Literal property values keyed by prop name.
pub type Properties = IndexMap<String, Value>;
/// Dynamic bindings keyed by prop name.
pub type Bindings = IndexMap<String, Binding>;
/// Open metadata mapping.
pub type Meta = IndexMap<String, Value>;

/// Whether a binding is evaluated as an expression or forwarded as a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingType {
    #[default]
    Expression,
    Property,
}

/// Whether a binding targets a single prop or spreads an object into the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    #[default]
    Single,
    Spread,
}

/// A dynamic expression attached to a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Expression source, kept verbatim.
    pub code: String,
    #[serde(rename = "bindingType", default)]
    pub binding_type: BindingType,
    #[serde(rename = "type", default)]
    pub kind: BindingKind,
}

impl Binding {
    /// A single-valued expression binding, the only kind the builder schema produces.
    pub fn expression(code: impl Into<String>) -> Self {
        Binding {
            code: code.into(),
            binding_type: BindingType::Expression,
            kind: BindingKind::Single,
        }
    }

    pub fn is_spread(&self) -> bool {
        self.kind == BindingKind::Spread
    }
}

/// Loop-local names introduced by a loop wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
}

impl Scope {
    pub fn is_empty(&self) -> bool {
        self.for_name.is_none() && self.index_name.is_none()
    }
}

/// A node of the render tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MitosisNode {
    /// Tag or component identifier.
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub bindings: Bindings,
    #[serde(default)]
    pub children: Vec<MitosisNode>,
    /// Named content projections, distinct from `children`.
    #[serde(default)]
    pub slots: IndexMap<String, Vec<MitosisNode>>,
    #[serde(default, skip_serializing_if = "Scope::is_empty")]
    pub scope: Scope,
    #[serde(default)]
    pub meta: Meta,
}

impl MitosisNode {
    pub fn new(name: impl Into<String>) -> Self {
        MitosisNode {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets a literal property, replacing any binding with the same key.
    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.bindings.shift_remove(&key);
        self.properties.insert(key, value);
    }

    /// Sets a binding, replacing any literal property with the same key.
    pub fn set_binding(&mut self, key: impl Into<String>, binding: Binding) {
        let key = key.into();
        self.properties.shift_remove(&key);
        self.bindings.insert(key, binding);
    }

    /// Replaces the children.
    pub fn with_children(mut self, children: Vec<MitosisNode>) -> Self {
        self.children = children;
        self
    }

    /// Whether the name denotes a native tag (`div`, `span`) rather than a component.
    pub fn is_tag(&self) -> bool {
        self.name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && !self.name.contains([':', '.'])
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(Value::as_str)
    }
}

/// How a state entry was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Property,
    Function,
    Method,
    Getter,
}

/// Initial value (or member source) of a state variable.
///
/// For `Property` and `Function` entries `code` is the value expression; for
/// `Method` and `Getter` entries it is the whole member source, e.g.
/// `get total() { return 1 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateValue {
    pub code: String,
    #[serde(rename = "type", default)]
    pub kind: StateKind,
}

impl StateValue {
    pub fn property(code: impl Into<String>) -> Self {
        StateValue {
            code: code.into(),
            kind: StateKind::Property,
        }
    }
}

/// A declared component input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Remaining input fields, carried verbatim.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hooks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_mount: Option<String>,
}

/// The root of a transformed component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MitosisComponent {
    pub name: String,
    #[serde(default)]
    pub state: IndexMap<String, StateValue>,
    #[serde(default)]
    pub inputs: Vec<ComponentInput>,
    #[serde(default)]
    pub hooks: Hooks,
    #[serde(default)]
    pub children: Vec<MitosisNode>,
    #[serde(default)]
    pub meta: Meta,
}

impl MitosisComponent {
    pub fn new(name: impl Into<String>) -> Self {
        MitosisComponent {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Global CSS carried alongside the tree.
    pub fn css_code(&self) -> Option<&str> {
        self.meta.get("cssCode").and_then(Value::as_str)
    }
}
