//! # Report Output
//!
//! Renders a [`ValidationResult`] for the terminal (or as JSON) and maps it
//! to a process exit code.

use anyhow::Result;
use apicheck_core::{format_validation_errors, CheckConfig, ValidationResult};

/// Exit code for a passing check.
pub const EXIT_VALID: u8 = 0;
/// Exit code for a failing check.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for load or usage errors.
pub const EXIT_ERROR: u8 = 2;

/// Render `result` as text (or pretty JSON when `json` is set).
pub fn render(result: &ValidationResult, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    let report = format_validation_errors(result);
    Ok(if report.is_empty() {
        "OK".to_string()
    } else {
        report
    })
}

/// Exit code for `result` under `config`.
pub fn exit_code(result: &ValidationResult, config: &CheckConfig) -> u8 {
    if !result.valid || (config.fail_on_warnings && result.has_warnings()) {
        EXIT_INVALID
    } else {
        EXIT_VALID
    }
}

/// Print `result` to stdout and return its exit code.
pub fn emit(result: &ValidationResult, json: bool, config: &CheckConfig) -> Result<u8> {
    println!("{}", render(result, json)?);
    Ok(exit_code(result, config))
}
