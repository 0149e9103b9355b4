//! # doctype-schema: Content-Type Descriptors
//!
//! Typed representation of the document types a headless CMS studio renders
//! editing forms from, together with the platform-side pieces needed to use
//! them: loading, validation, a read-only registry, and validation of stored
//! documents.
//!
//! ## Data Model (`descriptor`, `field_type`, `options`)
//!
//! A [`SchemaDescriptor`] is a named document type with an ordered list of
//! [`FieldDescriptor`]s. Field order is display order and is preserved by
//! every serialization path. Field types form a closed enum with an
//! `Unknown` fallback so that typos survive deserialization and are reported
//! by validation instead of being silently accepted.
//!
//! ## Built-in Types (`product`)
//!
//! [`product_schema`] returns the Product document, constructed once per
//! process.
//!
//! ## Loading & Validation (`loader`, `validate`)
//!
//! Descriptors are read from JSON or YAML and checked for duplicate field
//! names, unknown field types, and array fields without element types.
//! All violations are collected and reported together.
//!
//! ## Registry (`registry`)
//!
//! [`SchemaRegistry`] indexes validated descriptors by name. Once a name is
//! registered its `type` cannot change.
//!
//! ## Document Validation (`json_schema`)
//!
//! Descriptors compile to Draft 2020-12 JSON Schemas; [`DocumentValidator`]
//! checks stored documents against them.
//!
//! ## Crate Policy
//!
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Descriptors are immutable once registered; there is no runtime mutation API.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod field_type;
pub mod json_schema;
pub mod loader;
pub mod options;
pub mod product;
pub mod registry;
pub mod validate;

pub use config::{ConfigError, RegistryConfig};
pub use descriptor::{ElementType, FieldDescriptor, SchemaDescriptor, SchemaKind};
pub use error::SchemaError;
pub use field_type::{FieldType, KNOWN_FIELD_TYPES};
pub use json_schema::{
    to_json_schema, DocumentValidator, DocumentViolation, DocumentViolations, ValidatorOptions,
};
pub use loader::{SchemaLoader, SourceFormat};
pub use options::{FieldOptions, ImageOptions, OptionsError, StringOptions};
pub use product::{product_schema, PRODUCT_SCHEMA_NAME};
pub use registry::SchemaRegistry;
pub use validate::{validate_descriptor, ValidationViolations, Violation, ViolationKind};
