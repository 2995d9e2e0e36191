//! # Contract Errors
//!
//! Only structural problems are errors: a spec that cannot be loaded, or a
//! lookup against a spec that has no `definitions` section at all. A name
//! that is simply absent is a data condition and is reported through
//! `Option` or a `ValidationResult` instead.

use thiserror::Error;

/// Message used both as an error and as a result entry when the spec lacks
/// a `definitions` section.
pub const NO_DEFINITIONS_MESSAGE: &str = "No definitions found in OpenAPI spec";

/// Error raised by contract operations.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The spec has no `definitions` section.
    #[error("No definitions found in OpenAPI spec")]
    NoDefinitions,

    /// The spec document could not be read or parsed.
    #[error("failed to load OpenAPI spec {path}: {reason}")]
    SpecLoad {
        /// Path or label of the document.
        path: String,
        /// Reason the spec could not be loaded.
        reason: String,
    },
}
