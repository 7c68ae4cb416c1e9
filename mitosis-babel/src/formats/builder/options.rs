//! Import and export settings for builder content.

use serde::{Deserialize, Serialize};

/// Component name assumed when content carries none.
pub const DEFAULT_COMPONENT_NAME: &str = "MyComponent";

/// Settings applied while importing builder content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Component name used when the content has no `name`.
    pub component_name: String,
    /// Node name for elements with neither a component nor a tag name.
    pub placeholder_tag: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            placeholder_tag: "div".to_string(),
        }
    }
}

/// Settings applied while exporting to builder content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Write `jsCode` and `tsCode` as empty strings when there is nothing to put in them.
    pub emit_empty_code: bool,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            emit_empty_code: true,
            pretty: true,
        }
    }
}
