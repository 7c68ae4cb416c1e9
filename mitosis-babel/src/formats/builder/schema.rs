//! Builder content wire types.
//!
//! Only the fields the transcoder understands are modeled. Optional fields
//! are skipped when absent; the structural fields (`bindings`, `actions`,
//! `code`, `children`) are always written, which is what makes exported
//! content carry its documented empty defaults.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mappers::styles::ResponsiveStyles;

/// `@type` of every builder element.
pub const ELEMENT_TYPE: &str = "@builder.io/sdk:Element";

fn element_type() -> String {
    ELEMENT_TYPE.to_string()
}

/// A whole builder document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub data: BuilderData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<BuilderInput>,
    #[serde(default)]
    pub blocks: Vec<BuilderElement>,
}

/// One node of builder content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderElement {
    #[serde(rename = "@type", default = "element_type")]
    pub element_type: String,
    #[serde(rename = "@version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<BuilderComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Value>>,
    /// Dotted path to expression source.
    #[serde(default)]
    pub bindings: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive_styles: Option<ResponsiveStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<BuilderRepeat>,
    #[serde(default)]
    pub code: BuilderCode,
    /// Event name to handler source.
    #[serde(default)]
    pub actions: IndexMap<String, String>,
    #[serde(default)]
    pub children: Vec<BuilderElement>,
}

impl Default for BuilderElement {
    fn default() -> Self {
        BuilderElement {
            element_type: element_type(),
            version: None,
            id: None,
            tag_name: None,
            layer_name: None,
            component: None,
            properties: None,
            bindings: IndexMap::new(),
            responsive_styles: None,
            repeat: None,
            code: BuilderCode::default(),
            actions: IndexMap::new(),
            children: Vec::new(),
        }
    }
}

impl BuilderElement {
    /// The component name, if this element renders a component.
    pub fn component_name(&self) -> Option<&str> {
        self.component
            .as_ref()
            .map(|component| component.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderComponent {
    pub name: String,
    #[serde(default)]
    pub options: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderRepeat {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
}

/// Bound sources that take precedence over the plain `bindings`/`actions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderCode {
    #[serde(default)]
    pub actions: IndexMap<String, String>,
    #[serde(default)]
    pub bindings: IndexMap<String, String>,
}

/// A declared content input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(flatten)]
    pub rest: IndexMap<String, Value>,
}

/// Whether a raw JSON value is a builder element.
pub fn is_element(value: &Value) -> bool {
    value.get("@type").and_then(Value::as_str) == Some(ELEMENT_TYPE)
}
