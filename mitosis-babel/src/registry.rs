//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::MitosisComponent;
use crate::plugins::PluginChain;
use std::collections::HashMap;

/// Registry of component formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let component = registry.parse(source, "builder")?;
/// let json = registry.serialize(&component, "mitosis-json")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// The longest matching extension wins, so `card.mitosis.json` is
    /// `mitosis-json` while `card.json` is `builder`.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let filename = std::path::Path::new(filename)
            .file_name()
            .and_then(|name| name.to_str())?;

        self.formats
            .values()
            .flat_map(|format| {
                format
                    .file_extensions()
                    .iter()
                    .map(move |extension| (*extension, format.name()))
            })
            .filter(|(extension, _)| {
                filename
                    .strip_suffix(extension)
                    .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
            })
            .max_by_key(|(extension, _)| extension.len())
            .map(|(_, name)| name.to_string())
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<MitosisComponent, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a component using the specified format
    pub fn serialize(
        &self,
        component: &MitosisComponent,
        format: &str,
    ) -> Result<String, FormatError> {
        self.serialize_with_options(component, format, &HashMap::new())
    }

    /// Serialize a component using the specified format and options
    pub fn serialize_with_options(
        &self,
        component: &MitosisComponent,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(component, options)
    }

    /// Serialize a component after running it through a plugin chain
    pub fn serialize_with_plugins(
        &self,
        component: &MitosisComponent,
        format: &str,
        options: &HashMap<String, String>,
        plugins: &PluginChain,
    ) -> Result<String, FormatError> {
        let transformed = plugins.apply_pre(component)?;
        let output = self.serialize_with_options(&transformed, format, options)?;
        plugins.apply_post(output)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::builder::BuilderFormat::default());
        registry.register(crate::formats::mitosis_json::MitosisJsonFormat::default());

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
