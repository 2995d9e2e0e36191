//! # Contract Subcommands
//!
//! `contract`, `endpoint` and `list`: checks against an OpenAPI/Swagger
//! document loaded from disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apicheck_contract::{ContractValidator, OpenApiSpec, DEFAULT_METHOD};
use apicheck_core::{CheckConfig, ValidateOptions};
use clap::Args;

use crate::report;
use crate::schema::load_payload;

/// Arguments for the contract subcommand.
#[derive(Args, Debug)]
pub struct ContractArgs {
    /// OpenAPI/Swagger document (JSON or YAML).
    #[arg(long)]
    pub spec: PathBuf,

    /// Definition to validate against.
    #[arg(long, required_unless_present = "path", conflicts_with = "path")]
    pub definition: Option<String>,

    /// Validate against the response documented for this path instead.
    #[arg(long)]
    pub path: Option<String>,

    /// HTTP method of the documented operation (with `--path`).
    #[arg(long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Response status of the documented operation (with `--path`).
    #[arg(long, default_value = "200")]
    pub status: String,

    /// Report missing required fields as warnings.
    #[arg(long)]
    pub lenient: bool,

    /// Payload to validate (JSON or YAML).
    pub data: PathBuf,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the endpoint subcommand.
#[derive(Args, Debug)]
pub struct EndpointArgs {
    /// OpenAPI/Swagger document (JSON or YAML).
    #[arg(long)]
    pub spec: PathBuf,

    /// Documented path, e.g. `/pet/{petId}`.
    pub path: String,

    /// HTTP method (case-insensitive).
    #[arg(long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// OpenAPI/Swagger document (JSON or YAML).
    #[arg(long)]
    pub spec: PathBuf,

    /// List definition names instead of paths.
    #[arg(long)]
    pub schemas: bool,
}

fn load_validator(spec: &Path, options: ValidateOptions) -> Result<ContractValidator> {
    let spec = OpenApiSpec::from_path(spec).context("cannot load API spec")?;
    Ok(ContractValidator::with_options(spec, options))
}

/// Execute the contract subcommand.
pub fn run_contract(args: &ContractArgs, config: &CheckConfig) -> Result<u8> {
    let mut options = config.validate_options();
    if args.lenient {
        options.strict_required = false;
    }
    let validator = load_validator(&args.spec, options)?;
    let data = load_payload(&args.data)?;

    let result = match (&args.definition, &args.path) {
        (Some(definition), _) => validator.validate_response(&data, definition),
        (None, Some(path)) => {
            validator.validate_operation_response(path, &args.method, &args.status, &data)
        }
        (None, None) => anyhow::bail!("either --definition or --path is required"),
    };

    tracing::info!(
        spec = %args.spec.display(),
        valid = result.valid,
        warnings = result.warnings.len(),
        "contract check complete"
    );
    report::emit(&result, args.json, config)
}

/// Execute the endpoint subcommand.
pub fn run_endpoint(args: &EndpointArgs, config: &CheckConfig) -> Result<u8> {
    let validator = load_validator(&args.spec, config.validate_options())?;
    let result = validator.validate_endpoint_exists(&args.path, &args.method);
    report::emit(&result, args.json, config)
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, config: &CheckConfig) -> Result<u8> {
    let validator = load_validator(&args.spec, config.validate_options())?;
    let names = if args.schemas {
        validator.get_schema_names()
    } else {
        validator.get_endpoint_paths()
    };
    for name in &names {
        println!("{name}");
    }
    Ok(report::EXIT_VALID)
}
