//! # apicheck-core: Foundational Types for apicheck
//!
//! Leaf crate of the apicheck workspace. Defines the value types shared by
//! the schema validator and the contract validator:
//!
//! - [`ValidationResult`]: the `{valid, errors, warnings}` verdict produced
//!   by every result-style validation call.
//! - [`JsonType`]: runtime classification of a JSON value, distinguishing
//!   `integer` from `number` and `null` from `object`.
//! - [`ValidateOptions`] / [`CheckConfig`]: explicit configuration values.
//!   Nothing in the workspace holds process-wide mutable configuration.
//! - [`format_validation_errors`]: human-readable report rendering.
//! - [`load_document`]: JSON/YAML document loading for schemas, specs,
//!   and captured response bodies.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `apicheck-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod document;
pub mod error;
pub mod json_type;
pub mod result;

// Re-export primary types for ergonomic imports.
pub use config::{CheckConfig, ValidateOptions};
pub use document::{load_document, parse_document, DocumentFormat};
pub use error::CoreError;
pub use json_type::JsonType;
pub use result::{format_validation_errors, ValidationResult};
