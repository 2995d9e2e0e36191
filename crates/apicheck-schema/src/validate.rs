//! # Schema Validation
//!
//! Runtime validation of JSON payloads against hand-written JSON Schema
//! documents. The draft is detected from the schema's `$schema` keyword.
//!
//! ## Calling Conventions
//!
//! - [`SchemaValidator::validate`] never fails: problems are reported as
//!   data in a [`SchemaCheck`].
//! - [`SchemaValidator::validate_schema`] and [`SchemaValidator::assert_valid`]
//!   return a single [`SchemaValidationError::ValidationFailed`] carrying every
//!   violation found in one pass plus a pretty-printed snapshot of the data.
//!
//! Both styles agree: `validate(s, v).valid` iff `validate_schema(s, v)` is `Ok`.
//!
//! ## Compiled-Schema Cache
//!
//! Compiled validators are cached for the lifetime of the
//! [`SchemaValidator`], keyed by the serialized schema content. Entries are
//! never evicted or mutated.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use jsonschema::Validator;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Error during schema validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The data did not conform to the schema.
    #[error("Schema validation failed:\n{violations}\nData: {data}")]
    ValidationFailed {
        /// Structured list of individual violations, in evaluation order.
        violations: ValidationViolations,
        /// Pretty-printed JSON snapshot of the rejected data.
        data: String,
    },

    /// The schema itself is not a valid JSON Schema.
    #[error("failed to compile schema: {reason}")]
    SchemaCompileError {
        /// Compiler message.
        reason: String,
    },

    /// The schema file could not be loaded.
    #[error("schema load error for '{path}': {reason}")]
    SchemaLoadError {
        /// Path of the schema file.
        path: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// A failure re-raised with a caller-supplied label.
    #[error("{context}: {source}")]
    Context {
        /// Label naming what was being validated.
        context: String,
        /// The underlying failure.
        #[source]
        source: Box<SchemaValidationError>,
    },
}

impl SchemaValidationError {
    /// The violations carried by this error, looking through context labels.
    pub fn violations(&self) -> Option<&ValidationViolations> {
        match self {
            Self::ValidationFailed { violations, .. } => Some(violations),
            Self::Context { source, .. } => source.violations(),
            _ => None,
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer within the schema to the keyword that failed.
    pub schema_path: String,
    /// The failing keyword (`type`, `required`, `enum`, ...).
    pub keyword: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    /// One-line `<instancePath> <message>` rendering used in result-style
    /// error lists. Root-level violations render as the bare message.
    pub fn summary(&self) -> String {
        if self.instance_path.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.instance_path, self.message)
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl From<Vec<Violation>> for ValidationViolations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Result-style verdict of [`SchemaValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaCheck {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// One `<instancePath> <message>` line per violation.
    pub errors: Vec<String>,
}

/// A JSON Schema validator backed by the `jsonschema` crate.
///
/// `SchemaValidator` is `Send + Sync`; the compile cache sits behind a
/// mutex and compiled validators are shared through `Arc`.
#[derive(Default)]
pub struct SchemaValidator {
    /// Serialized schema -> compiled validator.
    cache: Mutex<HashMap<String, Arc<Validator>>>,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("cached_schemas", &self.cached_schema_count())
            .finish()
    }
}

impl SchemaValidator {
    /// Create a validator with an empty compile cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON or YAML schema document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::SchemaLoadError`] if the file cannot
    /// be read or parsed.
    pub fn load_schema(path: &Path) -> Result<Value, SchemaValidationError> {
        apicheck_core::load_document(path).map_err(|e| SchemaValidationError::SchemaLoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Number of compiled validators currently cached.
    pub fn cached_schema_count(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Fetch the compiled validator for `schema`, compiling on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::SchemaCompileError`] if `schema` is
    /// not a valid JSON Schema.
    pub fn compiled(&self, schema: &Value) -> Result<Arc<Validator>, SchemaValidationError> {
        let key = schema.to_string();

        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::trace!("schema cache hit");
            return Ok(Arc::clone(hit));
        }

        // Compile outside the lock; a concurrent duplicate compile is harmless.
        tracing::debug!(schema_bytes = key.len(), "compiling schema");
        let validator = jsonschema::validator_for(schema).map_err(|e| {
            SchemaValidationError::SchemaCompileError {
                reason: e.to_string(),
            }
        })?;

        let compiled = Arc::new(validator);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(key).or_insert(compiled)))
    }

    /// Every violation of `schema` by `data`, in evaluation order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::SchemaCompileError`] if `schema`
    /// cannot be compiled.
    pub fn violations(
        &self,
        schema: &Value,
        data: &Value,
    ) -> Result<Vec<Violation>, SchemaValidationError> {
        let validator = self.compiled(schema)?;
        let violations = validator
            .iter_errors(data)
            .map(|err| {
                let schema_path = err.schema_path.to_string();
                let keyword = schema_path
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                Violation {
                    instance_path: err.instance_path.to_string(),
                    schema_path,
                    keyword,
                    message: err.to_string(),
                }
            })
            .collect();
        Ok(violations)
    }

    /// Validate `data` against `schema`, reporting failures as data.
    ///
    /// A schema that fails to compile yields an invalid check with a single
    /// error describing the compile failure.
    pub fn validate(&self, schema: &Value, data: &Value) -> SchemaCheck {
        let errors: Vec<String> = match self.violations(schema, data) {
            Ok(violations) => violations.iter().map(Violation::summary).collect(),
            Err(e) => vec![e.to_string()],
        };
        tracing::debug!(errors = errors.len(), "schema validation complete");
        SchemaCheck {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Validate `data` against `schema`, returning `data` on success.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidationFailed`] listing every
    /// violation, or [`SchemaValidationError::SchemaCompileError`].
    pub fn validate_schema<'d>(
        &self,
        schema: &Value,
        data: &'d Value,
    ) -> Result<&'d Value, SchemaValidationError> {
        let violations = self.violations(schema, data)?;
        if violations.is_empty() {
            return Ok(data);
        }

        let snapshot = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        Err(SchemaValidationError::ValidationFailed {
            violations: violations.into(),
            data: snapshot,
        })
    }

    /// [`validate_schema`](Self::validate_schema), labelling any failure
    /// with `context`.
    pub fn assert_valid<'d>(
        &self,
        schema: &Value,
        data: &'d Value,
        context: Option<&str>,
    ) -> Result<&'d Value, SchemaValidationError> {
        self.validate_schema(schema, data).map_err(|e| match context {
            Some(label) => SchemaValidationError::Context {
                context: label.to_string(),
                source: Box::new(e),
            },
            None => e,
        })
    }
}
