//! # Validation Results
//!
//! [`ValidationResult`] is the single verdict type consumed by calling test
//! code. Field names are part of the serialized contract:
//! `{"valid": bool, "errors": [..], "warnings": [..]}`.
//!
//! Invariant: `errors.is_empty() == valid`. Warnings never affect `valid`.
//! The constructors are the only way the crate builds a result; the type is
//! serialize-only so a report cannot be read back with a contradictory
//! `valid` flag.

use serde::Serialize;

/// Header emitted before the error lines of a report.
pub const ERRORS_HEADER: &str = "Validation errors:";
/// Header emitted before the warning lines of a report.
pub const WARNINGS_HEADER: &str = "Validation warnings:";

const ERROR_MARKER: &str = "  ✗ ";
const WARNING_MARKER: &str = "  ⚠ ";

/// Outcome of one validation call.
///
/// Fields are public for reading. Build results through [`ok`](Self::ok),
/// [`failure`](Self::failure) or [`from_parts`](Self::from_parts), which
/// derive `valid` from `errors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Ordered error messages.
    pub errors: Vec<String>,
    /// Ordered warning messages.
    pub warnings: Vec<String>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl ValidationResult {
    /// A passing result with no messages.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A failing result carrying exactly one error.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::from_parts(vec![error.into()], Vec::new())
    }

    /// Build a result from collected messages, deriving `valid`.
    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Whether any warnings were recorded.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether the result carries no errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Render a result as a human-readable report.
///
/// Errors come first under [`ERRORS_HEADER`], one marked line each, then
/// warnings under [`WARNINGS_HEADER`]. Empty sections contribute nothing,
/// so a clean result renders as the empty string.
pub fn format_validation_errors(result: &ValidationResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !result.errors.is_empty() {
        lines.push(ERRORS_HEADER.to_string());
        lines.extend(result.errors.iter().map(|e| format!("{ERROR_MARKER}{e}")));
    }

    if !result.warnings.is_empty() {
        lines.push(WARNINGS_HEADER.to_string());
        lines.extend(
            result
                .warnings
                .iter()
                .map(|w| format!("{WARNING_MARKER}{w}")),
        );
    }

    lines.join("\n")
}
