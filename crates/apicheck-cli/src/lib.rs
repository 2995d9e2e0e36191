//! # apicheck-cli: Command-Line Front End
//!
//! Provides the `apicheck` binary, a thin layer that loads documents from
//! disk and hands them to the validators.
//!
//! ## Subcommands
//!
//! - `apicheck schema`: validate a payload against a JSON Schema file.
//! - `apicheck contract`: validate a payload against an OpenAPI definition
//!   or a documented operation response.
//! - `apicheck endpoint`: check that a path/method pair is documented.
//! - `apicheck list`: list documented paths or definition names.
//!
//! ```bash
//! apicheck schema --schema schemas/pet.schema.json response.json
//! apicheck contract --spec swagger.json --definition Pet response.json
//! apicheck contract --spec swagger.yaml --path /pet/{petId} --status 200 response.json
//! apicheck endpoint --spec swagger.json /pet --method post
//! ```
//!
//! ## Exit Codes
//!
//! `0` valid, `1` invalid (or warnings with `fail_on_warnings`), `2` when a
//! document cannot be loaded or the arguments are unusable.

pub mod contract;
pub mod report;
pub mod schema;

use std::path::Path;

use anyhow::{Context, Result};
use apicheck_core::CheckConfig;

/// Load the effective configuration: the optional YAML file, then
/// `APICHECK_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<CheckConfig> {
    let base = match path {
        Some(p) => CheckConfig::from_path(p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => CheckConfig::default(),
    };
    base.with_env_overrides()
        .context("invalid APICHECK_* environment override")
}
