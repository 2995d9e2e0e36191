//! # Schema Subcommand
//!
//! `apicheck schema --schema <file> <data>` validates a captured payload
//! against a hand-written JSON Schema.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apicheck_core::{load_document, CheckConfig, ValidationResult};
use apicheck_schema::SchemaValidator;
use clap::Args;
use serde_json::Value;

use crate::report;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// JSON Schema file (JSON or YAML).
    #[arg(long)]
    pub schema: PathBuf,

    /// Payload to validate (JSON or YAML).
    pub data: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs, config: &CheckConfig) -> Result<u8> {
    let schema = SchemaValidator::load_schema(&args.schema)?;
    let data = load_payload(&args.data)?;
    let result = check(&schema, &data);
    tracing::info!(
        schema = %args.schema.display(),
        valid = result.valid,
        "schema check complete"
    );
    report::emit(&result, args.json, config)
}

/// Run the schema validator and lift its verdict into a `ValidationResult`.
pub fn check(schema: &Value, data: &Value) -> ValidationResult {
    let check = SchemaValidator::new().validate(schema, data);
    ValidationResult::from_parts(check.errors, Vec::new())
}

/// Load a captured payload from disk.
pub fn load_payload(path: &Path) -> Result<Value> {
    load_document(path).with_context(|| format!("failed to load payload {}", path.display()))
}
