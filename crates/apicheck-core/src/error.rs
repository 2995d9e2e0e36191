//! # Error Types
//!
//! Errors raised by the core crate. Validation failures themselves are never
//! errors here: they are data inside [`crate::ValidationResult`]. Only
//! configuration and document loading can fail.

use thiserror::Error;

/// Error raised while loading configuration or documents.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The configuration file could not be parsed.
    #[error("invalid config {path}: {reason}")]
    InvalidConfig {
        /// Path of the offending file.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// An environment override held something other than a boolean.
    #[error("invalid value for {var}: expected true/false, got '{value}'")]
    InvalidEnvFlag {
        /// Variable name.
        var: String,
        /// The rejected value.
        value: String,
    },

    /// A JSON or YAML document could not be parsed.
    #[error("failed to load document {path}: {reason}")]
    DocumentLoad {
        /// Path or label of the document.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
