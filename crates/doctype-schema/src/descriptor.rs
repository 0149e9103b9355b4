//! # Schema Descriptors
//!
//! In-memory form of a content type: a named, titled list of fields. The
//! serde representation is the wire shape the studio and query layer
//! consume:
//!
//! ```text
//! { name, type: "document", title, fields: [ { name, title, type, options?, of? } ] }
//! ```
//!
//! Deserialization only enforces the shape. Structural rules (unique field
//! names, known types, element types on arrays) are checked by
//! [`crate::validate::validate_descriptor`], which reports every problem at
//! once.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::field_type::FieldType;
use crate::options::{FieldOptions, OptionsError};

/// Whether a descriptor is independently storable or only embeddable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Top-level storable entity; `name` is the storage collection key.
    Document,
    /// Embeddable object type, stored only inside documents.
    Object,
}

impl SchemaKind {
    /// Returns the descriptor tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element-type constraint of an array field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementType {
    /// Type every matching element must have.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl ElementType {
    /// Constraint admitting elements of `field_type`.
    pub fn new(field_type: FieldType) -> Self {
        Self { field_type }
    }
}

/// One named, typed property of a document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField<Value>", into = "RawField<FieldOptions>")]
pub struct FieldDescriptor {
    /// Document property key. Unique within the owning descriptor.
    pub name: String,
    /// Label shown in the editing form.
    pub title: String,
    /// Value kind.
    pub field_type: FieldType,
    /// Type-specific settings.
    pub options: Option<FieldOptions>,
    /// Element types; only meaningful on `array` fields.
    pub of: Option<Vec<ElementType>>,
}

impl FieldDescriptor {
    /// A field with no options and no element types.
    pub fn new(name: impl Into<String>, title: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            field_type,
            options: None,
            of: None,
        }
    }

    /// An `array` field admitting elements of the given types.
    pub fn array(
        name: impl Into<String>,
        title: impl Into<String>,
        of: impl IntoIterator<Item = FieldType>,
    ) -> Self {
        Self {
            of: Some(of.into_iter().map(ElementType::new).collect()),
            ..Self::new(name, title, FieldType::Array)
        }
    }

    /// Attach type-specific options.
    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Whether the studio offers hotspot selection for this field.
    pub fn hotspot_enabled(&self) -> bool {
        self.options.as_ref().is_some_and(FieldOptions::hotspot)
    }

    /// Declared element types, empty when `of` is absent.
    pub fn element_types(&self) -> impl Iterator<Item = &FieldType> {
        self.of.iter().flatten().map(|element| &element.field_type)
    }
}

/// Wire form of a field. On the way in `options` stays untyped until the
/// field type is known.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField<O> {
    name: String,
    title: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<O>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    of: Option<Vec<ElementType>>,
}

impl TryFrom<RawField<Value>> for FieldDescriptor {
    type Error = OptionsError;

    fn try_from(raw: RawField<Value>) -> Result<Self, Self::Error> {
        let options = raw
            .options
            .map(|value| FieldOptions::from_value(&raw.field_type, value))
            .transpose()?;

        Ok(Self {
            name: raw.name,
            title: raw.title,
            field_type: raw.field_type,
            options,
            of: raw.of,
        })
    }
}

impl From<FieldDescriptor> for RawField<FieldOptions> {
    fn from(field: FieldDescriptor) -> Self {
        Self {
            options: field.options,
            name: field.name,
            title: field.title,
            field_type: field.field_type,
            of: field.of,
        }
    }
}

/// A content type: named, titled, with fields in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDescriptor {
    /// Registry key and storage collection key.
    pub name: String,
    /// Document or embeddable object.
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    /// Display label.
    pub title: String,
    /// Fields in form layout order.
    pub fields: Vec<FieldDescriptor>,
}

impl SchemaDescriptor {
    /// A document type with the given fields.
    pub fn document(
        name: impl Into<String>,
        title: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SchemaKind::Document,
            title: title.into(),
            fields,
        }
    }

    /// Look up a field by name. `None` when the descriptor has no such field.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Whether this descriptor is a top-level storable document type.
    pub fn is_document(&self) -> bool {
        self.kind == SchemaKind::Document
    }

    /// Serialize to pretty-printed JSON in the wire shape.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(self).map_err(|e| SchemaError::Serialization(e.to_string()))
    }

    /// Serialize to a JSON value in the wire shape.
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        serde_json::to_value(self).map_err(|e| SchemaError::Serialization(e.to_string()))
    }

    /// Serialize to YAML in the wire shape.
    pub fn to_yaml(&self) -> Result<String, SchemaError> {
        serde_yaml::to_string(self).map_err(|e| SchemaError::Serialization(e.to_string()))
    }

    /// Parse the wire shape from JSON. Does not validate.
    pub fn from_json(content: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(content).map_err(|e| SchemaError::DocumentLoad {
            path: "<inline>".to_string(),
            reason: format!("invalid JSON: {e}"),
        })
    }

    /// Parse the wire shape from YAML. Does not validate.
    pub fn from_yaml(content: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(content).map_err(|e| SchemaError::DocumentLoad {
            path: "<inline>".to_string(),
            reason: format!("invalid YAML: {e}"),
        })
    }
}
