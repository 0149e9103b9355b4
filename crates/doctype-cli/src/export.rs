//! # Export Subcommand
//!
//! Prints a registered descriptor in the wire shape (JSON or YAML) or as the
//! JSON Schema its documents are validated against.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use doctype_schema::{to_json_schema, SchemaDescriptor, SchemaRegistry, ValidatorOptions};

/// Output format for `doctype export`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Descriptor wire shape, pretty-printed JSON.
    Json,
    /// Descriptor wire shape, YAML.
    Yaml,
    /// Compiled Draft 2020-12 JSON Schema for documents of this type.
    JsonSchema,
}

/// Arguments for the `doctype export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Registered schema name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Render a descriptor in the requested format.
pub fn render(
    descriptor: &SchemaDescriptor,
    format: ExportFormat,
    options: ValidatorOptions,
) -> Result<String> {
    let rendered = match format {
        ExportFormat::Json => descriptor.to_json()?,
        ExportFormat::Yaml => descriptor.to_yaml()?,
        ExportFormat::JsonSchema => {
            serde_json::to_string_pretty(&to_json_schema(descriptor, options))
                .context("failed to serialize JSON Schema")?
        }
    };
    Ok(rendered)
}

/// Execute the export subcommand.
///
/// Returns exit code: 0 on success, 1 if the schema is not registered.
pub fn run_export(
    args: &ExportArgs,
    registry: &SchemaRegistry,
    options: ValidatorOptions,
) -> Result<u8> {
    let Some(descriptor) = registry.get(&args.name) else {
        println!("unknown schema '{}'", args.name);
        return Ok(1);
    };

    let rendered = render(descriptor, args.format, options)?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), schema = %descriptor.name, "exported schema");
        }
        None => println!("{rendered}"),
    }

    Ok(0)
}
