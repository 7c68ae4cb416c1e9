//! Builder content ⇄ Mitosis component interoperability
//!
//!     This crate converts between builder content (the JSON trees a visual page builder stores)
//!     and the Mitosis component IR (the tree code generators consume). Both directions must keep
//!     the meaning of a component across round trips even though the two formats express styles,
//!     loops, slots and literal vs. dynamic values differently.
//!
//!     This is a pure lib, that is, it powers the mitosis cli but is shell agnostic: no code
//!     should be written that supposes a shell environment, be it std print, env vars etc.
//!     Diagnostics go through `tracing`; subscribers are the caller's business.
//!
//! Architecture
//!
//!     The format-agnostic tree lives in ./ir. Every concept the two formats express differently
//!     has its own mapper in ./mappers, a set of pure rules used in both directions. The builder
//!     format in ./formats/builder is then mostly routing: decode the wire schema, hand each
//!     field to its mapper, and put the pieces back together.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── plugins.rs              # Plugin chain run around serialization
//!     ├── formats
//!     │   ├── builder
//!     │   │   ├── schema.rs       # Wire types
//!     │   │   ├── bindings.rs     # Binding namespace dispatch
//!     │   │   ├── parser.rs       # Import
//!     │   │   ├── serializer.rs   # Export
//!     │   │   └── options.rs
//!     │   └── mitosis_json        # The IR as JSON
//!     ├── ir                      # Intermediate Representation
//!     └── mappers                 # Style, loop, slot, column, personalization and state rules
//!
//! Testing
//!     tests
//!     └── builder
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Round Trips
//!
//!     Export(Import(C)) equals C up to the structural defaults every exported element carries
//!     (`actions:{}`, `bindings:{}`, `code:{actions:{},bindings:{}}`, `children:[]`), provided C
//!     only uses the five binding namespaces and the two canonical breakpoints. Anything else is
//!     dropped on purpose, and Import(Export(Import(C))) == Import(C) always holds.

pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod mappers;
pub mod plugins;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::{BuilderFormat, ExportOptions, ImportOptions, MitosisJsonFormat};
pub use ir::{MitosisComponent, MitosisNode};
pub use plugins::{Plugin, PluginChain, PrePlugin};
pub use registry::FormatRegistry;

/// Import builder content JSON with default settings.
pub fn builder_content_to_component(source: &str) -> Result<MitosisComponent, FormatError> {
    formats::builder::parser::parse_from_builder(source, &ImportOptions::default())
}

/// Export a component to builder content JSON with default settings.
pub fn component_to_builder(component: &MitosisComponent) -> Result<String, FormatError> {
    formats::builder::serializer::serialize_to_builder(component, &ExportOptions::default())
}
