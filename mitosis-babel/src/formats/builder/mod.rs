//! Builder content format implementation
//!
//! This module implements bidirectional conversion between builder content JSON and the
//! component IR.
//!
//! # Element Mapping Table
//!
//! | Builder                                 | IR                                   | Notes                                  |
//! |-----------------------------------------|--------------------------------------|----------------------------------------|
//! | `tagName` / `component.name`            | node `name`                          | component name wins                    |
//! | `component.options.<k>` literal         | property `k`                         | `{{ expr }}` strings become bindings   |
//! | `component.options.<k>` element array   | slot `k`                             | fragments inside stay explicit         |
//! | `properties.<k>`                        | property `k`                         | keys listed in `builderProperties` meta|
//! | `bindings["component.options.k"]`       | binding `k`                          | `code.bindings` wins                   |
//! | `bindings["properties.k"]`              | binding `k`                          |                                        |
//! | `bindings["style.k"]`, `responsiveStyles` | one `style` binding                | see mappers::styles                    |
//! | `actions.<event>`                       | binding `on<Event>`                  | `code.actions` wins                    |
//! | `repeat`                                | `For` wrapper with `each` binding    | index name defaults to `index`         |
//! | `Columns` `options.columns`             | `Column` children                    | absent widths stay absent              |
//! | `PersonalizationContainer` variants     | `Variant` children                   | fields copied verbatim                 |
//! | `data.tsCode` / `data.jsCode`           | `state`, `hooks.onMount`             | `tsCode` wins                          |
//! | `data.cssCode`                          | component meta `cssCode`             |                                        |
//! | `id`, `@version`, `layerName`           | node meta                            |                                        |
//!
//! # Lossy Conversions
//!
//! - bindings outside the five known namespaces are dropped on import
//! - the `medium` and any other unmapped responsive bucket is dropped on import
//! - nested style objects other than the two canonical media queries are dropped on export
//! - spread bindings and dynamic column or variant fields are dropped on export
//! - `code.bindings` and `code.actions` are merged into `bindings`/`actions` on export

pub mod bindings;
pub mod options;
pub mod parser;
pub mod schema;
pub mod serializer;

pub use options::{ExportOptions, ImportOptions};

use crate::error::FormatError;
use crate::format::{bool_option, check_option_keys, Format};
use crate::ir::MitosisComponent;
use std::collections::HashMap;

/// Format implementation for builder content
#[derive(Debug, Clone, Default)]
pub struct BuilderFormat {
    import: ImportOptions,
    export: ExportOptions,
}

impl BuilderFormat {
    pub fn new(import: ImportOptions, export: ExportOptions) -> Self {
        BuilderFormat { import, export }
    }

    pub fn import_options(&self) -> &ImportOptions {
        &self.import
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export
    }
}

impl Format for BuilderFormat {
    fn name(&self) -> &str {
        "builder"
    }

    fn description(&self) -> &str {
        "Builder content JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["builder.json", "json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn option_keys(&self) -> &[&str] {
        &["pretty", "emit-empty-code"]
    }

    fn parse(&self, source: &str) -> Result<MitosisComponent, FormatError> {
        parser::parse_from_builder(source, &self.import)
    }

    fn serialize(&self, component: &MitosisComponent) -> Result<String, FormatError> {
        serializer::serialize_to_builder(component, &self.export)
    }

    fn serialize_with_options(
        &self,
        component: &MitosisComponent,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        check_option_keys(self, options)?;
        let mut export = self.export;
        if let Some(pretty) = bool_option(options, "pretty")? {
            export.pretty = pretty;
        }
        if let Some(emit) = bool_option(options, "emit-empty-code")? {
            export.emit_empty_code = emit;
        }
        serializer::serialize_to_builder(component, &export)
    }
}
