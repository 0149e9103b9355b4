//! # doctype-cli: Content-Type Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate`: Load descriptor files and report every structural violation
//! - `show` / `field`: Inspect a registered document type
//! - `export`: Print a descriptor as JSON, YAML, or compiled JSON Schema
//! - `check`: Validate stored documents against a document type
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers return exit codes.
//! - Handler functions delegate to `doctype-schema`; no schema logic here.
//! - Exit codes: 0 success, 1 validation failure, 2 operational error.

pub mod check;
pub mod export;
pub mod show;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use doctype_schema::{RegistryConfig, SchemaRegistry};

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// YAML configuration file; environment variables are used when absent.
    pub config: Option<PathBuf>,
    /// Schema directory overriding the configured one.
    pub schema_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// Resolve the effective configuration: file or environment, then flag overrides.
    pub fn registry_config(&self) -> Result<RegistryConfig> {
        let mut config = match &self.config {
            Some(path) => RegistryConfig::from_file(path)
                .with_context(|| format!("failed to load config: {}", path.display()))?,
            None => RegistryConfig::from_env().context("invalid environment configuration")?,
        };

        if let Some(dir) = &self.schema_dir {
            config.schema_dir = Some(dir.clone());
        }

        Ok(config)
    }

    /// Build the schema registry from the effective configuration.
    pub fn load_registry(&self) -> Result<(SchemaRegistry, RegistryConfig)> {
        let config = self.registry_config()?;
        let registry =
            SchemaRegistry::from_config(&config).context("failed to build schema registry")?;
        tracing::debug!(schemas = registry.len(), "registry loaded");
        Ok((registry, config))
    }
}

/// Read a JSON or YAML file into a JSON value, by extension.
pub fn read_value(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_dir_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("doctype.yaml");
        std::fs::write(&config_path, "schema_dir: from-file\nallow_unknown_properties: true\n")
            .unwrap();

        let options = GlobalOptions {
            config: Some(config_path),
            schema_dir: Some(PathBuf::from("from-flag")),
        };
        let config = options.registry_config().unwrap();
        assert_eq!(config.schema_dir, Some(PathBuf::from("from-flag")));
        assert!(config.allow_unknown_properties);
    }

    #[test]
    fn missing_config_file_is_error() {
        let options = GlobalOptions {
            config: Some(PathBuf::from("/nonexistent/doctype.yaml")),
            schema_dir: None,
        };
        assert!(options.registry_config().is_err());
    }

    #[test]
    fn read_value_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("doc.yaml");
        std::fs::write(&yaml, "sku: A-1\nfeatures: [durable]\n").unwrap();
        let json = dir.path().join("doc.json");
        std::fs::write(&json, r#"{"sku":"A-1","features":["durable"]}"#).unwrap();

        assert_eq!(read_value(&yaml).unwrap(), read_value(&json).unwrap());
    }
}
