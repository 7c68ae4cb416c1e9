//! Shared configuration loader for the mitosis toolchain.
//!
//! `defaults/mitosis.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MitosisConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mitosis_babel::{ExportOptions, ImportOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mitosis.default.toml");

/// Top-level configuration consumed by mitosis applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MitosisConfig {
    pub import: ImportConfig,
    pub export: ExportConfig,
}

/// Knobs for builder content import.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub component_name: String,
    pub placeholder_tag: String,
}

impl From<ImportConfig> for ImportOptions {
    fn from(config: ImportConfig) -> Self {
        ImportOptions {
            component_name: config.component_name,
            placeholder_tag: config.placeholder_tag,
        }
    }
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        ImportOptions {
            component_name: config.component_name.clone(),
            placeholder_tag: config.placeholder_tag.clone(),
        }
    }
}

/// Knobs for builder content export.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ExportConfig {
    pub emit_empty_code: bool,
    pub pretty: bool,
}

impl From<ExportConfig> for ExportOptions {
    fn from(config: ExportConfig) -> Self {
        ExportOptions {
            emit_empty_code: config.emit_empty_code,
            pretty: config.pretty,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MitosisConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MitosisConfig, ConfigError> {
    Loader::new().build()
}
