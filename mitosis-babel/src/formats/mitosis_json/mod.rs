//! Mitosis JSON format implementation
//!
//! The component IR serialized as-is. This is the form handed to code
//! generators and the easiest way to inspect what an import produced.

use crate::error::FormatError;
use crate::format::{bool_option, check_option_keys, Format};
use crate::ir::{validate, MitosisComponent};
use std::collections::HashMap;

/// Format implementation for the serialized component IR
#[derive(Debug, Clone)]
pub struct MitosisJsonFormat {
    pretty: bool,
}

impl Default for MitosisJsonFormat {
    fn default() -> Self {
        MitosisJsonFormat { pretty: true }
    }
}

impl MitosisJsonFormat {
    pub fn new(pretty: bool) -> Self {
        MitosisJsonFormat { pretty }
    }

    fn write(&self, component: &MitosisComponent, pretty: bool) -> Result<String, FormatError> {
        let result = if pretty {
            serde_json::to_string_pretty(component)
        } else {
            serde_json::to_string(component)
        };
        result.map_err(|err| FormatError::SerializationError(err.to_string()))
    }
}

impl Format for MitosisJsonFormat {
    fn name(&self) -> &str {
        "mitosis-json"
    }

    fn description(&self) -> &str {
        "Mitosis component IR as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mitosis.json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        &["pretty"]
    }

    fn parse(&self, source: &str) -> Result<MitosisComponent, FormatError> {
        let component: MitosisComponent =
            serde_json::from_str(source).map_err(|err| FormatError::ParseError(err.to_string()))?;
        validate(&component)?;
        Ok(component)
    }

    fn serialize(&self, component: &MitosisComponent) -> Result<String, FormatError> {
        self.write(component, self.pretty)
    }

    fn serialize_with_options(
        &self,
        component: &MitosisComponent,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_option_keys(self, options)?;
        let pretty = bool_option(options, "pretty")?.unwrap_or(self.pretty);
        self.write(component, pretty)
    }
}
