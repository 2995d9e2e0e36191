//! # apicheck CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apicheck_cli::contract::{
    run_contract, run_endpoint, run_list, ContractArgs, EndpointArgs, ListArgs,
};
use apicheck_cli::load_config;
use apicheck_cli::report::EXIT_ERROR;
use apicheck_cli::schema::{run_schema, SchemaArgs};

/// Validate API payloads against JSON Schemas and OpenAPI/Swagger contracts.
#[derive(Parser, Debug)]
#[command(name = "apicheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a payload against a JSON Schema file.
    Schema(SchemaArgs),

    /// Validate a payload against an OpenAPI definition or documented response.
    Contract(ContractArgs),

    /// Check that a path and method are documented.
    Endpoint(EndpointArgs),

    /// List documented paths or definition names.
    List(ListArgs),
}

fn filter_for(verbose: u8) -> EnvFilter {
    // RUST_LOG wins over -v.
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(filter_for(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "apicheck starting");

    let result = load_config(cli.config.as_deref()).and_then(|config| {
        tracing::debug!(?config, "effective configuration");
        match &cli.command {
            Commands::Schema(args) => run_schema(args, &config),
            Commands::Contract(args) => run_contract(args, &config),
            Commands::Endpoint(args) => run_endpoint(args, &config),
            Commands::List(args) => run_list(args, &config),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_schema() {
        let cli =
            Cli::try_parse_from(["apicheck", "schema", "--schema", "pet.json", "body.json"]).unwrap();
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema subcommand");
        };
        assert_eq!(args.schema, PathBuf::from("pet.json"));
        assert_eq!(args.data, PathBuf::from("body.json"));
        assert!(!args.json);
    }

    #[test]
    fn cli_parse_contract_definition() {
        let cli = Cli::try_parse_from([
            "apicheck",
            "contract",
            "--spec",
            "swagger.json",
            "--definition",
            "Pet",
            "--lenient",
            "body.json",
        ])
        .unwrap();
        let Commands::Contract(args) = cli.command else {
            panic!("expected contract subcommand");
        };
        assert_eq!(args.definition.as_deref(), Some("Pet"));
        assert!(args.path.is_none());
        assert!(args.lenient);
        assert_eq!(args.method, "get");
        assert_eq!(args.status, "200");
    }

    #[test]
    fn cli_parse_contract_operation() {
        let cli = Cli::try_parse_from([
            "apicheck",
            "contract",
            "--spec",
            "swagger.yaml",
            "--path",
            "/pet/{petId}",
            "--status",
            "404",
            "body.json",
        ])
        .unwrap();
        let Commands::Contract(args) = cli.command else {
            panic!("expected contract subcommand");
        };
        assert_eq!(args.path.as_deref(), Some("/pet/{petId}"));
        assert_eq!(args.status, "404");
    }

    #[test]
    fn cli_contract_requires_definition_or_path() {
        let res = Cli::try_parse_from(["apicheck", "contract", "--spec", "s.json", "body.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn cli_contract_definition_conflicts_with_path() {
        let res = Cli::try_parse_from([
            "apicheck",
            "contract",
            "--spec",
            "s.json",
            "--definition",
            "Pet",
            "--path",
            "/pet",
            "body.json",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn cli_parse_endpoint_with_method() {
        let cli = Cli::try_parse_from([
            "apicheck", "endpoint", "--spec", "s.json", "/pet", "--method", "POST",
        ])
        .unwrap();
        let Commands::Endpoint(args) = cli.command else {
            panic!("expected endpoint subcommand");
        };
        assert_eq!(args.path, "/pet");
        assert_eq!(args.method, "POST");
    }

    #[test]
    fn cli_parse_list_schemas() {
        let cli = Cli::try_parse_from(["apicheck", "list", "--spec", "s.json", "--schemas"]).unwrap();
        assert!(matches!(cli.command, Commands::List(ListArgs { schemas: true, .. })));
    }

    #[test]
    fn cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "apicheck", "list", "--spec", "s.json", "-vv", "--config", "apicheck.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("apicheck.yaml")));
    }

    #[test]
    fn cli_missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["apicheck"]).is_err());
    }
}
