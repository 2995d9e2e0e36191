//! # Response Shape Checking
//!
//! Recursive comparison of a JSON value against a Swagger definition.
//!
//! For a definition the checker runs two passes:
//!
//! 1. every name in `required` must be present in the value (a non-object
//!    value lacks every field);
//! 2. every property present both in `properties` and in the value is
//!    checked against its field schema.
//!
//! A field schema is either a `$ref` (followed only when the value is a
//! non-null object) or a `type`, optionally with `enum` and, for arrays,
//! `items`. Properties the definition does not declare are ignored.
//!
//! `$ref` targets are looked up by their last `/`-separated segment. The
//! recursion follows the value, not the schema graph, so self-referencing
//! definitions terminate.

use apicheck_core::{JsonType, ValidateOptions, ValidationResult};
use serde_json::{Map, Value};

use crate::error::NO_DEFINITIONS_MESSAGE;

/// Definition name named by a `$ref` string: its last path segment.
pub fn ref_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Message emitted when a definition name is not in `definitions`.
pub(crate) fn schema_not_found(name: &str) -> String {
    format!("Schema '{name}' not found in OpenAPI spec definitions")
}

/// Accumulates messages for one validation call.
#[derive(Debug, Default)]
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn absorb(&mut self, result: ValidationResult) {
        self.errors.extend(result.errors);
        self.warnings.extend(result.warnings);
    }

    fn absorb_prefixed(&mut self, prefix: &str, result: ValidationResult) {
        self.errors
            .extend(result.errors.into_iter().map(|e| format!("{prefix}{e}")));
        self.warnings
            .extend(result.warnings.into_iter().map(|w| format!("{prefix}{w}")));
    }

    fn into_result(self) -> ValidationResult {
        ValidationResult::from_parts(self.errors, self.warnings)
    }
}

/// Checks values against the definitions of one spec.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ShapeChecker<'s> {
    definitions: Option<&'s Map<String, Value>>,
    options: ValidateOptions,
}

impl<'s> ShapeChecker<'s> {
    pub(crate) fn new(definitions: Option<&'s Map<String, Value>>, options: ValidateOptions) -> Self {
        Self {
            definitions,
            options,
        }
    }

    fn lookup(&self, name: &str) -> Result<&'s Value, String> {
        let definitions = self
            .definitions
            .ok_or_else(|| NO_DEFINITIONS_MESSAGE.to_string())?;
        definitions.get(name).ok_or_else(|| schema_not_found(name))
    }

    /// Check `value` against the definition called `name`.
    pub(crate) fn check_definition(&self, value: &Value, name: &str) -> ValidationResult {
        match self.lookup(name) {
            Ok(schema) => self.check_schema(value, schema),
            Err(message) => ValidationResult::failure(message),
        }
    }

    /// Check `value` against an object schema (named or inline).
    pub(crate) fn check_schema(&self, value: &Value, schema: &Value) -> ValidationResult {
        let mut findings = Findings::default();
        let object = value.as_object();

        let required = schema
            .get("required")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for field in required.iter().filter_map(Value::as_str) {
            if object.is_some_and(|o| o.contains_key(field)) {
                continue;
            }
            let message = format!("Required field '{field}' is missing from response");
            if self.options.strict_required {
                findings.errors.push(message);
            } else {
                findings.warnings.push(message);
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        if let (Some(properties), Some(object)) = (properties, object) {
            for (name, field_schema) in properties {
                if let Some(field_value) = object.get(name) {
                    self.check_field(name, field_value, field_schema, &mut findings);
                }
            }
        }

        findings.into_result()
    }

    fn check_field(&self, name: &str, value: &Value, schema: &Value, findings: &mut Findings) {
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            if value.is_object() {
                let target = ref_name(reference);
                match self.lookup(target) {
                    Ok(definition) => findings.absorb(self.check_schema(value, definition)),
                    Err(_) => {
                        tracing::warn!(field = name, reference, "dangling $ref");
                        findings.errors.push(format!(
                            "Field '{name}' references schema '{target}' which is not defined in OpenAPI spec"
                        ));
                    }
                }
            }
            return;
        }

        let Some(expected) = schema.get("type").and_then(Value::as_str) else {
            return;
        };

        let actual = JsonType::of(value);
        if !actual.matches(expected) {
            findings.errors.push(format!(
                "Field '{name}' has type '{actual}' but schema expects '{expected}' (value: {value})"
            ));
        }

        if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
            if !enum_contains(allowed, value) {
                let listed: Vec<String> = allowed.iter().map(enum_display).collect();
                findings.errors.push(format!(
                    "Field '{name}' has value '{}' which is not in allowed enum values: [{}]",
                    enum_display(value),
                    listed.join(", ")
                ));
            }
        }

        if expected == "array" {
            if let (Some(items), Some(elements)) = (schema.get("items"), value.as_array()) {
                self.check_items(name, elements, items, findings);
            }
        }
    }

    /// Check each element of an array against its `items` schema. Messages
    /// are prefixed with `<name>[<i>]`; an empty `name` gives `[<i>]`.
    pub(crate) fn check_array(
        &self,
        name: &str,
        elements: &[Value],
        items: &Value,
    ) -> ValidationResult {
        let mut findings = Findings::default();
        self.check_items(name, elements, items, &mut findings);
        findings.into_result()
    }

    fn check_items(&self, name: &str, elements: &[Value], items: &Value, findings: &mut Findings) {
        if let Some(reference) = items.get("$ref").and_then(Value::as_str) {
            let target = ref_name(reference);
            for (index, element) in elements.iter().enumerate() {
                let prefix = format!("{name}[{index}]: ");
                findings.absorb_prefixed(&prefix, self.check_definition(element, target));
            }
        } else if let Some(expected) = items.get("type").and_then(Value::as_str) {
            for (index, element) in elements.iter().enumerate() {
                let actual = JsonType::of(element);
                if !actual.matches(expected) {
                    findings.errors.push(format!(
                        "{name}[{index}] has type '{actual}' but schema expects '{expected}'"
                    ));
                }
            }
        }
    }
}

/// Enum membership; numbers compare by value, so `1.0` is a member of `[1]`.
fn enum_contains(allowed: &[Value], value: &Value) -> bool {
    allowed.iter().any(|candidate| match (candidate, value) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        _ => candidate == value,
    })
}

/// Strings print raw, everything else as compact JSON.
fn enum_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
