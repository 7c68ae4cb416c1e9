//! Builder content format tests
//!
//! Fixtures under ./fixtures are complete builder documents that already carry every
//! structural default the exporter writes, so they must survive Export(Import(C)) unchanged.

mod export;
mod import;
mod round_trip;

use mitosis_babel::formats::builder::parser::parse_from_builder;
use mitosis_babel::{ImportOptions, MitosisComponent};
use serde_json::Value;

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/builder/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("Failed to read {path}: {err}"))
}

pub fn import_value(content: &Value) -> MitosisComponent {
    parse_from_builder(&content.to_string(), &ImportOptions::default()).expect("import failed")
}
