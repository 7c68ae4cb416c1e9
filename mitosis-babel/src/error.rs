//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// Structurally invalid input, e.g. a non-element inside a slot array
    #[error("Malformed input at {path}: {reason}")]
    MalformedInput { path: String, reason: String },
    /// A plugin in the chain rejected the component
    #[error("Plugin '{name}' failed: {message}")]
    Plugin { name: String, message: String },
}

impl FormatError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FormatError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
