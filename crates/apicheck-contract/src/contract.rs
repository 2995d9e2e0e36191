//! # Contract Validator
//!
//! [`ContractValidator`] answers questions about one [`OpenApiSpec`]:
//! does an endpoint exist, does a definition exist, and does a response
//! body match a definition. Every check returns a fresh
//! [`ValidationResult`]; the spec is never mutated, so repeated calls with
//! the same inputs give identical results.

use apicheck_core::{JsonType, ValidateOptions, ValidationResult};
use serde_json::Value;

use crate::check::{ref_name, schema_not_found, ShapeChecker};
use crate::error::{ContractError, NO_DEFINITIONS_MESSAGE};
use crate::spec::OpenApiSpec;

/// Method assumed by [`ContractValidator::validate_endpoint_exists_get`].
pub const DEFAULT_METHOD: &str = "get";

/// Validates endpoints and response bodies against an API spec.
#[derive(Debug, Clone)]
pub struct ContractValidator {
    spec: OpenApiSpec,
    options: ValidateOptions,
}

impl ContractValidator {
    /// Create a validator with strict required-field handling.
    pub fn new(spec: OpenApiSpec) -> Self {
        Self::with_options(spec, ValidateOptions::default())
    }

    /// Create a validator whose [`validate_response`](Self::validate_response)
    /// uses `options`.
    pub fn with_options(spec: OpenApiSpec, options: ValidateOptions) -> Self {
        Self { spec, options }
    }

    /// The spec this validator checks against.
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    /// Default options used by [`validate_response`](Self::validate_response).
    pub fn options(&self) -> ValidateOptions {
        self.options
    }

    /// Check that `path` is documented and supports `method`
    /// (case-insensitive). At most one error is reported.
    pub fn validate_endpoint_exists(&self, path: &str, method: &str) -> ValidationResult {
        let Some(operations) = self.spec.paths.get(path) else {
            tracing::debug!(path, "endpoint not in spec");
            return ValidationResult::failure(format!("Endpoint '{path}' not found"));
        };

        if operations.get(method.to_ascii_lowercase()).is_none() {
            tracing::debug!(path, method, "method not in spec");
            return ValidationResult::failure(format!(
                "Method '{}' not found for endpoint '{path}'",
                method.to_ascii_uppercase()
            ));
        }

        ValidationResult::ok()
    }

    /// [`validate_endpoint_exists`](Self::validate_endpoint_exists) for `GET`.
    pub fn validate_endpoint_exists_get(&self, path: &str) -> ValidationResult {
        self.validate_endpoint_exists(path, DEFAULT_METHOD)
    }

    /// Check that a definition called `name` exists.
    pub fn validate_schema_exists(&self, name: &str) -> ValidationResult {
        match &self.spec.definitions {
            None => ValidationResult::failure(NO_DEFINITIONS_MESSAGE),
            Some(definitions) if !definitions.contains_key(name) => {
                ValidationResult::failure(schema_not_found(name))
            }
            Some(_) => ValidationResult::ok(),
        }
    }

    /// Look up a definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::NoDefinitions`] if the spec has no
    /// `definitions` section. A missing name is `Ok(None)`.
    pub fn get_schema(&self, name: &str) -> Result<Option<&Value>, ContractError> {
        let definitions = self
            .spec
            .definitions
            .as_ref()
            .ok_or(ContractError::NoDefinitions)?;
        Ok(definitions.get(name))
    }

    /// Check a response body against the definition `schema_name`, using
    /// the validator's default options.
    pub fn validate_response(&self, value: &Value, schema_name: &str) -> ValidationResult {
        self.validate_response_against_schema(value, schema_name, self.options)
    }

    /// Check a response body against the definition `schema_name`.
    ///
    /// Missing required fields go to `errors` or `warnings` depending on
    /// `options.strict_required`; only errors make the result invalid.
    pub fn validate_response_against_schema(
        &self,
        value: &Value,
        schema_name: &str,
        options: ValidateOptions,
    ) -> ValidationResult {
        let result = self.checker(options).check_definition(value, schema_name);
        tracing::debug!(
            schema = schema_name,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "response validated"
        );
        result
    }

    /// Check a response body against the schema documented for
    /// `method path` with status `status`, falling back to the `default`
    /// response.
    ///
    /// A documented response without a schema accepts any body. Array
    /// responses whose items are a `$ref` are checked element by element,
    /// each message prefixed with `[<index>]: `.
    pub fn validate_operation_response(
        &self,
        path: &str,
        method: &str,
        status: &str,
        value: &Value,
    ) -> ValidationResult {
        let endpoint = self.validate_endpoint_exists(path, method);
        if !endpoint.valid {
            return endpoint;
        }

        let responses = self
            .spec
            .operation(path, method)
            .and_then(|op| op.get("responses"));
        let Some(response) = responses.and_then(|r| r.get(status).or_else(|| r.get("default")))
        else {
            return ValidationResult::failure(format!(
                "Response '{status}' not documented for {} '{path}'",
                method.to_ascii_uppercase()
            ));
        };

        let Some(schema) = response.get("schema") else {
            return ValidationResult::ok();
        };

        self.validate_against_inline(value, schema)
    }

    fn validate_against_inline(&self, value: &Value, schema: &Value) -> ValidationResult {
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return self.validate_response(value, ref_name(reference));
        }

        let checker = self.checker(self.options);
        let Some(expected) = schema.get("type").and_then(Value::as_str) else {
            return checker.check_schema(value, schema);
        };

        let actual = JsonType::of(value);
        if !actual.matches(expected) {
            return ValidationResult::failure(format!(
                "Response has type '{actual}' but schema expects '{expected}'"
            ));
        }

        match (value.as_array(), schema.get("items")) {
            (Some(elements), Some(items)) => checker.check_array("", elements, items),
            (Some(_), None) => ValidationResult::ok(),
            (None, _) => checker.check_schema(value, schema),
        }
    }

    /// All documented paths, in document order.
    pub fn get_endpoint_paths(&self) -> Vec<&str> {
        self.spec.paths.keys().map(String::as_str).collect()
    }

    /// All definition names in document order; empty without a
    /// `definitions` section.
    pub fn get_schema_names(&self) -> Vec<&str> {
        self.spec
            .definitions
            .as_ref()
            .map(|d| d.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn checker(&self, options: ValidateOptions) -> ShapeChecker<'_> {
        ShapeChecker::new(self.spec.definitions.as_ref(), options)
    }
}
