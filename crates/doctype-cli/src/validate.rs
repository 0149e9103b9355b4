//! # Validate Subcommand
//!
//! Loads descriptor files and reports every violation per file. Files are
//! checked independently; one bad file does not stop the others.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use doctype_schema::{SchemaError, SchemaLoader};

/// Arguments for the `doctype validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Descriptor files (`.json`, `.yaml`, `.yml`).
    #[arg(value_name = "FILE", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if every file is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let loader = SchemaLoader::new();
    let mut failed = 0usize;

    for path in &args.paths {
        if !validate_one(&loader, path) {
            failed += 1;
        }
    }

    let total = args.paths.len();
    println!("Schemas: {}/{} passed", total - failed, total);

    Ok(if failed > 0 { 1 } else { 0 })
}

fn validate_one(loader: &SchemaLoader, path: &Path) -> bool {
    match loader.load_file(path) {
        Ok(descriptor) => {
            println!(
                "OK {} ({}, {} fields)",
                path.display(),
                descriptor.name,
                descriptor.fields.len()
            );
            true
        }
        Err(SchemaError::Invalid { violations, .. }) => {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(
            &good,
            doctype_schema::product_schema().to_json().unwrap(),
        )
        .unwrap();
        let bad = dir.path().join("bad.yaml");
        std::fs::write(
            &bad,
            "name: bad\ntype: document\ntitle: Bad\nfields:\n  - name: tags\n    title: Tags\n    type: array\n",
        )
        .unwrap();

        let ok = ValidateArgs {
            paths: vec![good.clone()],
        };
        assert_eq!(run_validate(&ok).unwrap(), 0);

        let mixed = ValidateArgs {
            paths: vec![good, bad, dir.path().join("missing.json")],
        };
        assert_eq!(run_validate(&mixed).unwrap(), 1);
    }
}
