//! # apicheck-schema: JSON Schema Validation
//!
//! Validates API payloads against hand-written JSON Schema documents for
//! domain entities.
//!
//! Two calling conventions are offered by [`SchemaValidator`]:
//!
//! - [`SchemaValidator::validate`] returns a [`SchemaCheck`] and never fails.
//! - [`SchemaValidator::validate_schema`] / [`SchemaValidator::assert_valid`]
//!   return `Err(SchemaValidationError::ValidationFailed)` carrying every
//!   [`Violation`] and a pretty-printed snapshot of the rejected data, for
//!   callers that want a failure to abort the current step.
//!
//! Compiled schemas are cached inside the validator; no other state is kept
//! between calls.

pub mod validate;

pub use validate::{
    SchemaCheck, SchemaValidationError, SchemaValidator, ValidationViolations, Violation,
};
