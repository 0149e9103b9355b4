//! # Schema Registry
//!
//! Name-indexed set of validated descriptors. A registry is assembled once,
//! at start-up, and then only read.
//!
//! ## Identity Invariant
//!
//! A descriptor's `name`/`type` pair is its storage identity. Once a name is
//! registered, re-registering it as a different kind is rejected with
//! `SchemaError::ImmutableIdentity`, and re-registering it with different
//! content is rejected with `SchemaError::AlreadyRegistered`. Registering
//! an identical descriptor again is a no-op.

use std::collections::BTreeMap;

use crate::config::RegistryConfig;
use crate::descriptor::SchemaDescriptor;
use crate::error::SchemaError;
use crate::json_schema::{DocumentValidator, ValidatorOptions};
use crate::loader::SchemaLoader;
use crate::product::product_schema;
use crate::validate::validate_descriptor;

/// Registered descriptors, keyed and iterated by name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, SchemaDescriptor>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in document types.
    pub fn with_builtin() -> Result<Self, SchemaError> {
        let mut registry = Self::new();
        registry.register(product_schema().clone())?;
        Ok(registry)
    }

    /// Built-in types plus every descriptor in the configured schema directory.
    ///
    /// # Errors
    ///
    /// Fails on the first descriptor that cannot be loaded or registered.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, SchemaError> {
        let mut registry = Self::with_builtin()?;

        if let Some(dir) = &config.schema_dir {
            for descriptor in SchemaLoader::new().load_dir(dir)? {
                registry.register(descriptor)?;
            }
        }

        tracing::info!(schema_count = registry.len(), "schema registry ready");

        Ok(registry)
    }

    /// Validate and add a descriptor.
    ///
    /// # Errors
    ///
    /// - `SchemaError::Invalid` if the descriptor breaks a structural rule.
    /// - `SchemaError::ImmutableIdentity` if the name is registered with another kind.
    /// - `SchemaError::AlreadyRegistered` if the name is registered with other content.
    pub fn register(&mut self, descriptor: SchemaDescriptor) -> Result<(), SchemaError> {
        validate_descriptor(&descriptor).map_err(|violations| SchemaError::Invalid {
            schema_name: descriptor.name.clone(),
            violations,
        })?;

        if let Some(existing) = self.schemas.get(&descriptor.name) {
            if existing.kind != descriptor.kind {
                return Err(SchemaError::ImmutableIdentity {
                    name: descriptor.name,
                    registered: existing.kind,
                    attempted: descriptor.kind,
                });
            }
            if *existing != descriptor {
                return Err(SchemaError::AlreadyRegistered {
                    name: descriptor.name,
                });
            }
            tracing::debug!(schema = %descriptor.name, "schema already registered; skipping");
            return Ok(());
        }

        tracing::debug!(
            schema = %descriptor.name,
            kind = %descriptor.kind,
            fields = descriptor.fields.len(),
            "registered schema"
        );
        self.schemas.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.schemas.get(name)
    }

    /// Look up a descriptor by name, failing with `SchemaError::UnknownSchema`.
    pub fn require(&self, name: &str) -> Result<&SchemaDescriptor, SchemaError> {
        self.get(name).ok_or_else(|| SchemaError::UnknownSchema {
            name: name.to_string(),
        })
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Returns the number of registered descriptors.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// All descriptors, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaDescriptor> {
        self.schemas.values()
    }

    /// Document types only, sorted by name.
    pub fn documents(&self) -> impl Iterator<Item = &SchemaDescriptor> {
        self.iter().filter(|d| d.is_document())
    }

    /// Build a document validator for a registered document type.
    ///
    /// # Errors
    ///
    /// `SchemaError::UnknownSchema` if the name is not registered, otherwise
    /// any error from [`DocumentValidator::with_options`].
    pub fn validator_for(
        &self,
        name: &str,
        options: ValidatorOptions,
    ) -> Result<DocumentValidator, SchemaError> {
        DocumentValidator::with_options(self.require(name)?, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldDescriptor, SchemaKind};
    use crate::field_type::FieldType;
    use serde_json::json;

    fn brand() -> SchemaDescriptor {
        SchemaDescriptor::document(
            "brand",
            "Brand",
            vec![FieldDescriptor::new("label", "Label", FieldType::String)],
        )
    }

    #[test]
    fn builtin_contains_product() {
        let registry = SchemaRegistry::with_builtin().unwrap();
        assert_eq!(registry.names(), vec!["product"]);
        assert_eq!(registry.get("product"), Some(product_schema()));
        assert!(registry.get("weight").is_none());
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = SchemaRegistry::with_builtin().unwrap();
        registry.register(brand()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["brand", "product"]);
        assert_eq!(registry.require("brand").unwrap().title, "Brand");
    }

    #[test]
    fn identical_reregistration_is_noop() {
        let mut registry = SchemaRegistry::new();
        registry.register(brand()).unwrap();
        registry.register(brand()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn kind_change_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(brand()).unwrap();

        let mut as_object = brand();
        as_object.kind = SchemaKind::Object;
        let err = registry.register(as_object).unwrap_err();
        assert!(
            matches!(
                err,
                SchemaError::ImmutableIdentity {
                    registered: SchemaKind::Document,
                    attempted: SchemaKind::Object,
                    ..
                }
            ),
            "got {err}"
        );
        assert!(registry.get("brand").unwrap().is_document());
    }

    #[test]
    fn content_change_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(brand()).unwrap();

        let mut changed = brand();
        changed.fields.push(FieldDescriptor::new("since", "Since", FieldType::Number));
        let err = registry.register(changed).unwrap_err();
        assert!(matches!(err, SchemaError::AlreadyRegistered { .. }));
        assert_eq!(registry.get("brand").unwrap().fields.len(), 1);
    }

    #[test]
    fn invalid_descriptor_not_registered() {
        let mut registry = SchemaRegistry::new();
        let broken = SchemaDescriptor::document(
            "broken",
            "Broken",
            vec![FieldDescriptor::new("tags", "Tags", FieldType::Array)],
        );
        assert!(matches!(
            registry.register(broken),
            Err(SchemaError::Invalid { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn documents_excludes_objects() {
        let mut registry = SchemaRegistry::with_builtin().unwrap();
        let mut tag = brand();
        tag.name = "tag".into();
        tag.kind = SchemaKind::Object;
        registry.register(tag).unwrap();

        let documents: Vec<&str> = registry.documents().map(|d| d.name.as_str()).collect();
        assert_eq!(documents, vec!["product"]);
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn validator_for_registered_document() {
        let registry = SchemaRegistry::with_builtin().unwrap();
        let validator = registry
            .validator_for("product", ValidatorOptions::default())
            .unwrap();
        assert!(validator.is_valid(&json!({ "sku": "A-1" })));

        let err = registry
            .validator_for("brand", ValidatorOptions::default())
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownSchema { .. }));
    }

    #[test]
    fn from_config_loads_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("brand.json"), brand().to_json().unwrap()).unwrap();
        // Same content as the built-in; accepted as a no-op.
        std::fs::write(
            dir.path().join("product.json"),
            product_schema().to_json().unwrap(),
        )
        .unwrap();

        let config = RegistryConfig {
            schema_dir: Some(dir.path().to_path_buf()),
            ..RegistryConfig::default()
        };
        let registry = SchemaRegistry::from_config(&config).unwrap();
        assert_eq!(registry.names(), vec!["brand", "product"]);
    }

    #[test]
    fn from_config_rejects_conflicting_product() {
        let dir = tempfile::tempdir().unwrap();
        let mut renamed = product_schema().clone();
        renamed.title = "Item".into();
        std::fs::write(dir.path().join("product.json"), renamed.to_json().unwrap()).unwrap();

        let config = RegistryConfig {
            schema_dir: Some(dir.path().to_path_buf()),
            ..RegistryConfig::default()
        };
        let err = SchemaRegistry::from_config(&config).unwrap_err();
        assert!(matches!(err, SchemaError::AlreadyRegistered { .. }));
    }
}
