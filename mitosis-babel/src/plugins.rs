//! Plugin chain
//!
//! Plugins are IR → IR transforms run before a component is serialized, and
//! text → text transforms run on the serialized output. They apply strictly
//! in registration order. A plugin may replace or remove nodes, but the tree
//! it hands back is validated before the next plugin sees it.

use crate::error::FormatError;
use crate::ir::{validate, MitosisComponent};

pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Transforms the component before serialization.
    fn pre(&self, component: MitosisComponent) -> Result<MitosisComponent, FormatError> {
        Ok(component)
    }

    /// Transforms the serialized output.
    fn post(&self, output: String) -> Result<String, FormatError> {
        Ok(output)
    }
}

/// A plugin built from a component transform function.
pub struct PrePlugin<F> {
    name: String,
    transform: F,
}

impl<F> PrePlugin<F>
where
    F: Fn(MitosisComponent) -> Result<MitosisComponent, FormatError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, transform: F) -> Self {
        PrePlugin {
            name: name.into(),
            transform,
        }
    }
}

impl<F> Plugin for PrePlugin<F>
where
    F: Fn(MitosisComponent) -> Result<MitosisComponent, FormatError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn pre(&self, component: MitosisComponent) -> Result<MitosisComponent, FormatError> {
        (self.transform)(component)
    }
}

/// Ordered list of plugins.
#[derive(Default)]
pub struct PluginChain {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) {
        self.plugins.push(Box::new(plugin));
    }

    pub fn with<P: Plugin + 'static>(mut self, plugin: P) -> Self {
        self.register(plugin);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Runs every `pre` transform on a copy of `component`.
    pub fn apply_pre(&self, component: &MitosisComponent) -> Result<MitosisComponent, FormatError> {
        let mut current = component.clone();
        for plugin in &self.plugins {
            current = plugin.pre(current)?;
            if let Err(err) = validate(&current) {
                tracing::warn!(plugin = plugin.name(), error = %err, "plugin returned an invalid tree");
                return Err(err);
            }
            tracing::debug!(plugin = plugin.name(), "applied pre plugin");
        }
        Ok(current)
    }

    /// Runs every `post` transform on `output`.
    pub fn apply_post(&self, output: String) -> Result<String, FormatError> {
        self.plugins
            .iter()
            .try_fold(output, |output, plugin| plugin.post(output))
    }
}
