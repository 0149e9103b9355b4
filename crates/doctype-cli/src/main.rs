//! # doctype CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use doctype_cli::check::{run_check, CheckArgs};
use doctype_cli::export::{run_export, ExportArgs};
use doctype_cli::show::{run_field, run_show, FieldArgs, ShowArgs};
use doctype_cli::validate::{run_validate, ValidateArgs};
use doctype_cli::GlobalOptions;

/// Content-type schema toolkit.
///
/// Validates document type descriptors, inspects the registered types, and
/// checks stored documents against them.
#[derive(Parser, Debug)]
#[command(name = "doctype", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of additional descriptor files to register.
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate descriptor files and report every violation.
    Validate(ValidateArgs),

    /// Print the field table of a registered schema, or list all schemas.
    Show(ShowArgs),

    /// Print the type of one field of a registered schema.
    Field(FieldArgs),

    /// Export a registered schema as JSON, YAML, or JSON Schema.
    Export(ExportArgs),

    /// Validate documents against a registered document type.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let global = GlobalOptions {
        config: cli.config,
        schema_dir: cli.schema_dir,
    };

    match dispatch(cli.command, &global) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn dispatch(command: Commands, global: &GlobalOptions) -> anyhow::Result<u8> {
    match command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Show(args) => {
            let (registry, _) = global.load_registry()?;
            run_show(&args, &registry)
        }
        Commands::Field(args) => {
            let (registry, _) = global.load_registry()?;
            run_field(&args, &registry)
        }
        Commands::Export(args) => {
            let (registry, config) = global.load_registry()?;
            run_export(&args, &registry, config.validator_options())
        }
        Commands::Check(args) => {
            let (registry, config) = global.load_registry()?;
            run_check(&args, &registry, config.validator_options())
        }
    }
}
