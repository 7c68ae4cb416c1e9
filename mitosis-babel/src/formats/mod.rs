//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the component IR and its serialized representations.

pub mod builder;
pub mod mitosis_json;

pub use builder::{BuilderFormat, ExportOptions, ImportOptions};
pub use mitosis_json::MitosisJsonFormat;
