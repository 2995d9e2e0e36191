//! # apicheck-contract: OpenAPI Contract Validation
//!
//! Checks REST API responses against a Swagger 2.0 / OpenAPI document.
//!
//! - [`OpenApiSpec`]: the parsed document (`paths`, `definitions`, version
//!   and `info`), loadable from JSON or YAML.
//! - [`ContractValidator`]: endpoint and definition existence checks, and
//!   recursive response-vs-definition checks with `$ref` resolution and
//!   array item checks.
//!
//! All checks are result-style: they return a [`ValidationResult`] and
//! never fail. The one exception is [`ContractValidator::get_schema`], which
//! returns [`ContractError::NoDefinitions`] when the spec has no
//! `definitions` section at all.
//!
//! ## Permissiveness
//!
//! Properties present in a response but not declared by the definition are
//! not reported.

pub mod check;
pub mod contract;
pub mod error;
pub mod spec;

pub use apicheck_core::{format_validation_errors, ValidateOptions, ValidationResult};
pub use check::ref_name;
pub use contract::{ContractValidator, DEFAULT_METHOD};
pub use error::{ContractError, NO_DEFINITIONS_MESSAGE};
pub use spec::{Info, OpenApiSpec};
