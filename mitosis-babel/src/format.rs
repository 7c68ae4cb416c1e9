//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for importing and exporting components.

use crate::error::FormatError;
use crate::ir::MitosisComponent;
use std::collections::HashMap;

/// Trait for component formats
///
/// Implementors provide conversion between a string representation and the component IR.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<MitosisComponent, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "builder", "mitosis-json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// Extensions may contain dots themselves (`builder.json`); detection picks the
    /// longest extension that matches.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → component)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (component → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Option keys accepted by [`Format::serialize_with_options`]
    fn option_keys(&self) -> &[&str] {
        &[]
    }

    /// Parse source text into a component
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<MitosisComponent, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a component into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _component: &MitosisComponent) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a component, optionally using extra parameters.
    ///
    /// Formats without options can rely on the default implementation, which
    /// delegates to [`Format::serialize`] and rejects any parameter.
    fn serialize_with_options(
        &self,
        component: &MitosisComponent,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(component)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Reads a boolean format option (`true`/`false`, `yes`/`no`, `1`/`0`).
pub fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<bool>, FormatError> {
    let Some(raw) = options.get(key) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        _ => Err(FormatError::NotSupported(format!(
            "Option '{key}' expects a boolean, got '{raw}'"
        ))),
    }
}

/// Rejects option keys a format does not know.
pub fn check_option_keys(
    format: &dyn Format,
    options: &HashMap<String, String>,
) -> Result<(), FormatError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| !format.option_keys().contains(key))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FormatError::NotSupported(format!(
        "Format '{}' does not support option(s): {}",
        format.name(),
        unknown.join(", ")
    )))
}
