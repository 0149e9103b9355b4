//! # Error Types
//!
//! Errors raised while loading, registering, or applying schema descriptors.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Descriptor-level problems (duplicate field names, unknown field types,
//! array fields without element types) are never reported one at a time:
//! they are collected into [`ValidationViolations`] and surfaced together
//! through [`SchemaError::Invalid`].

use thiserror::Error;

use crate::descriptor::SchemaKind;
use crate::json_schema::DocumentViolations;
use crate::validate::ValidationViolations;

/// Top-level error type for schema operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The descriptor deserialized but violates one or more structural rules.
    #[error("schema '{schema_name}' is invalid:\n{violations}")]
    Invalid {
        /// Name of the descriptor (and source path when loaded from disk).
        schema_name: String,
        /// Every violation found, in field order.
        violations: ValidationViolations,
    },

    /// A descriptor or document file could not be read or parsed.
    #[error("load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path (or `<inline>`) of the source that failed to load.
        path: String,
        /// Reason the source could not be loaded.
        reason: String,
    },

    /// Serialization to JSON or YAML failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An operation that requires a document type received an object type.
    #[error("schema '{name}' has type '{kind}'; a document type is required")]
    NotADocument {
        /// Descriptor name.
        name: String,
        /// The descriptor's actual kind.
        kind: SchemaKind,
    },

    /// A different descriptor is already registered under this name.
    #[error("schema '{name}' is already registered with different content")]
    AlreadyRegistered {
        /// Descriptor name.
        name: String,
    },

    /// Re-registration attempted to change the `type` of a registered name.
    #[error("schema '{name}' is registered as '{registered}' and cannot become '{attempted}'")]
    ImmutableIdentity {
        /// Descriptor name.
        name: String,
        /// Kind currently registered.
        registered: SchemaKind,
        /// Kind of the rejected descriptor.
        attempted: SchemaKind,
    },

    /// No descriptor is registered under this name.
    #[error("unknown schema '{name}'")]
    UnknownSchema {
        /// Requested descriptor name.
        name: String,
    },

    /// The JSON Schema compiled from a descriptor could not be built.
    #[error("JSON Schema build error for '{schema_name}': {reason}")]
    JsonSchemaBuild {
        /// Descriptor name.
        schema_name: String,
        /// Reason reported by the JSON Schema compiler.
        reason: String,
    },

    /// A stored document does not conform to its descriptor.
    #[error("document does not match schema '{schema_name}':\n{violations}")]
    DocumentInvalid {
        /// Descriptor name.
        schema_name: String,
        /// Structured list of individual violations.
        violations: DocumentViolations,
    },

    /// IO error reading a schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
