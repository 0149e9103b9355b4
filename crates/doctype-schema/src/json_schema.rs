//! # Document Validation
//!
//! Compiles a descriptor into a JSON Schema (Draft 2020-12) and validates
//! stored documents against it with the `jsonschema` crate.
//!
//! ## Mapping
//!
//! | Field type | JSON Schema |
//! |------------|-------------|
//! | `string`, `text` | `{"type": "string"}` (`enum` when a `list` option is set) |
//! | `number` | `{"type": "number"}` |
//! | `boolean` | `{"type": "boolean"}` |
//! | `array` | `{"type": "array", "items": ...}`, `anyOf` over several element types |
//! | `image` | object with an `asset` reference; `hotspot`/`crop` only when enabled |
//!
//! Every declared field is optional. Keys starting with `_` are system
//! properties (`_id`, `_type`, `_rev`, ...) and are always allowed; `_type`
//! must equal the descriptor name. Any other undeclared key is rejected
//! unless [`ValidatorOptions::allow_unknown_properties`] is set.

use std::fmt;

use jsonschema::Validator;
use serde_json::{json, Map, Value};

use crate::descriptor::{FieldDescriptor, SchemaDescriptor};
use crate::error::SchemaError;
use crate::field_type::FieldType;
use crate::validate::validate_descriptor;

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// Knobs for document validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Accept document keys that are neither declared fields nor system properties.
    pub allow_unknown_properties: bool,
}

/// Compile a descriptor into a JSON Schema for its documents.
///
/// Fields with unknown types compile to `{}`; callers that need a sound
/// schema validate the descriptor first, as [`DocumentValidator`] does.
pub fn to_json_schema(descriptor: &SchemaDescriptor, options: ValidatorOptions) -> Value {
    let mut properties = Map::new();
    properties.insert("_id".to_string(), json!({ "type": "string" }));
    properties.insert("_type".to_string(), json!({ "const": descriptor.name }));
    properties.insert("_rev".to_string(), json!({ "type": "string" }));
    properties.insert("_createdAt".to_string(), json!({ "type": "string" }));
    properties.insert("_updatedAt".to_string(), json!({ "type": "string" }));

    for field in &descriptor.fields {
        properties.insert(field.name.clone(), field_schema(field));
    }

    let mut schema = json!({
        "$schema": DRAFT_2020_12,
        "title": descriptor.title,
        "type": "object",
        "properties": properties,
        "patternProperties": { "^_": {} },
    });

    if !options.allow_unknown_properties {
        schema["additionalProperties"] = json!(false);
    }

    schema
}

fn field_schema(field: &FieldDescriptor) -> Value {
    match &field.field_type {
        FieldType::String | FieldType::Text => {
            match field.options.as_ref().and_then(|o| o.list()) {
                Some(list) => json!({ "type": "string", "enum": list }),
                None => json!({ "type": "string" }),
            }
        }
        FieldType::Array => {
            let mut items: Vec<Value> = field.element_types().map(element_schema).collect();
            let items = match items.len() {
                0 => json!({}),
                1 => items.remove(0),
                _ => json!({ "anyOf": items }),
            };
            json!({ "type": "array", "items": items })
        }
        FieldType::Image => image_schema(field.hotspot_enabled()),
        other => element_schema(other),
    }
}

fn element_schema(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::String | FieldType::Text => json!({ "type": "string" }),
        FieldType::Number => json!({ "type": "number" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Image => image_schema(false),
        FieldType::Array => json!({ "type": "array" }),
        FieldType::Unknown(_) => json!({}),
    }
}

fn unit_interval() -> Value {
    json!({ "type": "number", "minimum": 0, "maximum": 1 })
}

fn image_schema(hotspot: bool) -> Value {
    let mut properties = Map::new();
    properties.insert("_type".to_string(), json!({ "const": "image" }));
    properties.insert("_key".to_string(), json!({ "type": "string" }));
    properties.insert(
        "asset".to_string(),
        json!({
            "type": "object",
            "properties": {
                "_ref": { "type": "string", "minLength": 1 },
                "_type": { "const": "reference" }
            },
            "required": ["_ref"],
            "additionalProperties": false
        }),
    );

    if hotspot {
        properties.insert(
            "hotspot".to_string(),
            json!({
                "type": "object",
                "properties": {
                    "_type": { "type": "string" },
                    "x": unit_interval(),
                    "y": unit_interval(),
                    "height": unit_interval(),
                    "width": unit_interval()
                },
                "required": ["x", "y", "height", "width"],
                "additionalProperties": false
            }),
        );
        properties.insert(
            "crop".to_string(),
            json!({
                "type": "object",
                "properties": {
                    "_type": { "type": "string" },
                    "top": unit_interval(),
                    "bottom": unit_interval(),
                    "left": unit_interval(),
                    "right": unit_interval()
                },
                "required": ["top", "bottom", "left", "right"],
                "additionalProperties": false
            }),
        );
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": ["asset"],
        "additionalProperties": false
    })
}

/// A single document violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentViolation {
    /// JSON Pointer path to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer path within the compiled schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for DocumentViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of document violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentViolations {
    violations: Vec<DocumentViolation>,
}

impl DocumentViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[DocumentViolation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<DocumentViolation> {
        self.violations
    }
}

impl fmt::Display for DocumentViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Validates documents of one document type.
///
/// The JSON Schema is compiled once at construction.
pub struct DocumentValidator {
    schema_name: String,
    json_schema: Value,
    validator: Validator,
}

impl fmt::Debug for DocumentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl DocumentValidator {
    /// Build a validator with default options.
    ///
    /// # Errors
    ///
    /// See [`DocumentValidator::with_options`].
    pub fn new(descriptor: &SchemaDescriptor) -> Result<Self, SchemaError> {
        Self::with_options(descriptor, ValidatorOptions::default())
    }

    /// Build a validator for a document type.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotADocument` for object types,
    /// `SchemaError::Invalid` if the descriptor breaks a structural rule, and
    /// `SchemaError::JsonSchemaBuild` if the compiled schema is rejected.
    pub fn with_options(
        descriptor: &SchemaDescriptor,
        options: ValidatorOptions,
    ) -> Result<Self, SchemaError> {
        if !descriptor.is_document() {
            return Err(SchemaError::NotADocument {
                name: descriptor.name.clone(),
                kind: descriptor.kind,
            });
        }

        validate_descriptor(descriptor).map_err(|violations| SchemaError::Invalid {
            schema_name: descriptor.name.clone(),
            violations,
        })?;

        let json_schema = to_json_schema(descriptor, options);

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&json_schema)
            .map_err(|e| SchemaError::JsonSchemaBuild {
                schema_name: descriptor.name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(schema = %descriptor.name, "compiled document validator");

        Ok(Self {
            schema_name: descriptor.name.clone(),
            json_schema,
            validator,
        })
    }

    /// Name of the document type this validator checks.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The compiled JSON Schema.
    pub fn json_schema(&self) -> &Value {
        &self.json_schema
    }

    /// Whether `document` conforms, without collecting violations.
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }

    /// Validate a document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DocumentInvalid` with one entry per violation.
    pub fn validate(&self, document: &Value) -> Result<(), SchemaError> {
        let violations: Vec<DocumentViolation> = self
            .validator
            .iter_errors(document)
            .map(|e| DocumentViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::DocumentInvalid {
                schema_name: self.schema_name.clone(),
                violations: DocumentViolations { violations },
            })
        }
    }
}
