//! # Check Subcommand
//!
//! Validates stored documents (JSON or YAML files) against a registered
//! document type.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use doctype_schema::{DocumentValidator, SchemaError, SchemaRegistry, ValidatorOptions};

/// Arguments for the `doctype check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Registered document type name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Document files (`.json`, `.yaml`, `.yml`).
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if every document conforms, 1 otherwise.
pub fn run_check(
    args: &CheckArgs,
    registry: &SchemaRegistry,
    options: ValidatorOptions,
) -> Result<u8> {
    let validator = match registry.validator_for(&args.name, options) {
        Ok(validator) => validator,
        Err(e @ (SchemaError::UnknownSchema { .. } | SchemaError::NotADocument { .. })) => {
            println!("{e}");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    let mut failed = 0usize;
    for path in &args.documents {
        if !check_one(&validator, path) {
            failed += 1;
        }
    }

    let total = args.documents.len();
    println!("Documents: {}/{} passed", total - failed, total);

    Ok(if failed > 0 { 1 } else { 0 })
}

fn check_one(validator: &DocumentValidator, path: &std::path::Path) -> bool {
    let document = match crate::read_value(path) {
        Ok(document) => document,
        Err(e) => {
            println!("FAIL {}: {e:#}", path.display());
            return false;
        }
    };

    match validator.validate(&document) {
        Ok(()) => {
            println!("OK {}", path.display());
            true
        }
        Err(SchemaError::DocumentInvalid { violations, .. }) => {
            println!("FAIL {} ({} violation(s))", path.display(), violations.len());
            println!("{violations}");
            false
        }
        Err(e) => {
            println!("FAIL {}: {e}", path.display());
            false
        }
    }
}
