//! Registry configuration.
//!
//! Settings come from environment variables or a YAML file; explicit
//! construction is used in tests.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::json_schema::ValidatorOptions;

/// Directory of additional schema descriptors.
pub const ENV_SCHEMA_DIR: &str = "DOCTYPE_SCHEMA_DIR";

/// Accept undeclared, non-system document properties (`1`/`true`/`yes`, `0`/`false`/`no`).
pub const ENV_ALLOW_UNKNOWN_PROPERTIES: &str = "DOCTYPE_ALLOW_UNKNOWN_PROPERTIES";

/// Configuration for building a [`crate::SchemaRegistry`] and its validators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Directory scanned for `*.json`/`*.yaml`/`*.yml` descriptors, in
    /// addition to the built-in types.
    pub schema_dir: Option<PathBuf>,
    /// Accept document keys that are neither declared fields nor system properties.
    pub allow_unknown_properties: bool,
}

impl RegistryConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DOCTYPE_SCHEMA_DIR` (default: unset, built-in types only)
    /// - `DOCTYPE_ALLOW_UNKNOWN_PROPERTIES` (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let schema_dir = lookup(ENV_SCHEMA_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let allow_unknown_properties = match lookup(ENV_ALLOW_UNKNOWN_PROPERTIES) {
            Some(raw) => parse_bool(ENV_ALLOW_UNKNOWN_PROPERTIES, &raw)?,
            None => false,
        };

        Ok(Self {
            schema_dir,
            allow_unknown_properties,
        })
    }

    /// Load configuration from a YAML file with the same keys as the struct.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Document validation options implied by this configuration.
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            allow_unknown_properties: self.allow_unknown_properties,
        }
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool(var.to_string(), raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid boolean for {0}: {1:?}")]
    InvalidBool(String, String),
    #[error("cannot read config file {0}: {1}")]
    Io(String, std::io::Error),
    #[error("invalid config file {0}: {1}")]
    Parse(String, String),
}
