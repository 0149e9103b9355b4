//! # Descriptor Loading
//!
//! Reads schema descriptors from JSON or YAML sources and validates them.
//! A descriptor that parses but breaks a structural rule is rejected with
//! every violation listed; it never reaches the registry.
//!
//! Format is chosen from the file extension: `.yaml`/`.yml` are YAML,
//! everything else is JSON.

use std::path::{Path, PathBuf};

use crate::descriptor::SchemaDescriptor;
use crate::error::SchemaError;
use crate::validate::validate_descriptor;

/// Serialization format of a descriptor source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl SourceFormat {
    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Loads and validates schema descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaLoader;

impl SchemaLoader {
    /// Create a loader.
    pub fn new() -> Self {
        Self
    }

    /// Parse and validate a descriptor from an in-memory source.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DocumentLoad` if the content does not parse into
    /// the descriptor shape, or `SchemaError::Invalid` if it violates a
    /// structural rule.
    pub fn load_str(
        &self,
        content: &str,
        format: SourceFormat,
    ) -> Result<SchemaDescriptor, SchemaError> {
        let descriptor = match format {
            SourceFormat::Json => SchemaDescriptor::from_json(content)?,
            SourceFormat::Yaml => SchemaDescriptor::from_yaml(content)?,
        };

        validate_descriptor(&descriptor).map_err(|violations| SchemaError::Invalid {
            schema_name: descriptor.name.clone(),
            violations,
        })?;

        Ok(descriptor)
    }

    /// Read, parse, and validate a descriptor file.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DocumentLoad` if the file cannot be read or
    /// parsed, or `SchemaError::Invalid` (naming the file) if it violates a
    /// structural rule.
    pub fn load_file(&self, path: &Path) -> Result<SchemaDescriptor, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;

        let descriptor = self
            .load_str(&content, SourceFormat::from_path(path))
            .map_err(|e| match e {
                SchemaError::DocumentLoad { reason, .. } => SchemaError::DocumentLoad {
                    path: path.display().to_string(),
                    reason,
                },
                SchemaError::Invalid {
                    schema_name,
                    violations,
                } => SchemaError::Invalid {
                    schema_name: format!("{schema_name} ({})", path.display()),
                    violations,
                },
                other => other,
            })?;

        tracing::debug!(
            path = %path.display(),
            schema = %descriptor.name,
            fields = descriptor.fields.len(),
            "loaded schema descriptor"
        );

        Ok(descriptor)
    }

    /// Load every `*.json`, `*.yaml`, and `*.yml` file in `dir`, in
    /// filename order. Subdirectories and other files are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DocumentLoad` if the directory cannot be read,
    /// or the first error from [`SchemaLoader::load_file`].
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<SchemaDescriptor>, SchemaError> {
        let entries = std::fs::read_dir(dir).map_err(|e| SchemaError::DocumentLoad {
            path: dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_descriptor_file(&path) {
                paths.push(path);
            } else {
                tracing::debug!(path = %path.display(), "skipping non-descriptor entry");
            }
        }
        paths.sort();

        let descriptors = paths
            .iter()
            .map(|path| self.load_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            dir = %dir.display(),
            count = descriptors.len(),
            "loaded schema directory"
        );

        Ok(descriptors)
    }
}

fn is_descriptor_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ViolationKind;

    const VALID_YAML: &str = r#"
name: brand
type: document
title: Brand
fields:
  - name: label
    title: Label
    type: string
  - name: logo
    title: Logo
    type: image
    options:
      hotspot: false
"#;

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.yaml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("a.yml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("a.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a")), SourceFormat::Json);
    }

    #[test]
    fn load_valid_yaml() {
        let descriptor = SchemaLoader::new()
            .load_str(VALID_YAML, SourceFormat::Yaml)
            .unwrap();
        assert_eq!(descriptor.name, "brand");
        assert_eq!(descriptor.field_names(), vec!["label", "logo"]);
        assert!(!descriptor.field("logo").unwrap().hotspot_enabled());
    }

    #[test]
    fn invalid_descriptor_reports_every_violation() {
        let json = r#"{
            "name": "broken",
            "type": "document",
            "title": "Broken",
            "fields": [
                { "name": "tags", "title": "Tags", "type": "array" },
                { "name": "tags", "title": "Tags again", "type": "colour" }
            ]
        }"#;
        let err = SchemaLoader::new().load_str(json, SourceFormat::Json).unwrap_err();
        match err {
            SchemaError::Invalid {
                schema_name,
                violations,
            } => {
                assert_eq!(schema_name, "broken");
                let kinds: Vec<_> = violations.kinds().cloned().collect();
                assert!(kinds.contains(&ViolationKind::MissingArrayElementType {
                    field: "tags".into()
                }));
                assert!(kinds.contains(&ViolationKind::DuplicateFieldName {
                    name: "tags".into(),
                    first: 0
                }));
                assert!(kinds.contains(&ViolationKind::UnknownFieldType {
                    field: "tags".into(),
                    type_name: "colour".into()
                }));
            }
            other => panic!("Expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn malformed_source_is_load_error() {
        let err = SchemaLoader::new()
            .load_str("name: [unterminated", SourceFormat::Yaml)
            .unwrap_err();
        assert!(matches!(err, SchemaError::DocumentLoad { .. }), "got {err}");
    }

    #[test]
    fn load_file_names_path_in_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"name":"bad","type":"document","title":"Bad","fields":[]}"#,
        )
        .unwrap();

        let err = SchemaLoader::new().load_file(&path).unwrap_err();
        match err {
            SchemaError::Invalid { schema_name, .. } => {
                assert!(schema_name.starts_with("bad ("));
                assert!(schema_name.contains("bad.json"));
            }
            other => panic!("Expected Invalid, got: {other}"),
        }
    }

    #[test]
    fn missing_file_is_load_error() {
        let err = SchemaLoader::new()
            .load_file(Path::new("/nonexistent/schema.json"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::DocumentLoad { .. }));
    }

    #[test]
    fn load_dir_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-brand.yaml"), VALID_YAML).unwrap();
        std::fs::write(
            dir.path().join("a-tag.json"),
            r#"{"name":"tag","type":"object","title":"Tag","fields":[{"name":"label","title":"Label","type":"string"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("README.md"), "not a schema").unwrap();

        let descriptors = SchemaLoader::new().load_dir(dir.path()).unwrap();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["tag", "brand"]);
    }
}
