//! # Field Options
//!
//! Type-specific field settings. Descriptors carry `options` as an open
//! JSON object; here it is resolved against the field's type into a typed
//! variant, so an option that means nothing for a type (or a misspelled
//! key) is rejected when the descriptor is loaded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::field_type::FieldType;

/// Options for `image` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageOptions {
    /// Enables focal-point and crop-region selection in the studio.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hotspot: bool,
}

/// Options for `string` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringOptions {
    /// Restricts the value to one of these strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
}

/// Options resolved against the owning field's type. Serializes as the
/// plain `options` object, without a variant tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldOptions {
    /// Options of an `image` field.
    Image(ImageOptions),
    /// Options of a `string` field.
    String(StringOptions),
    /// Options attached to a field whose type is not recognized. Kept
    /// verbatim so validation can report the type rather than the options.
    Opaque(Map<String, Value>),
}

/// Error resolving a descriptor's `options` object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// `options` must be a JSON object.
    #[error("options for a '{field_type}' field must be an object")]
    NotAnObject {
        /// Type of the owning field.
        field_type: String,
    },

    /// The field type takes no options.
    #[error("'{field_type}' fields do not accept options")]
    Unsupported {
        /// Type of the owning field.
        field_type: String,
    },

    /// The object does not match the options shape for the field type.
    #[error("invalid options for a '{field_type}' field: {reason}")]
    Invalid {
        /// Type of the owning field.
        field_type: String,
        /// Deserializer message.
        reason: String,
    },
}

impl FieldOptions {
    /// Resolve a raw `options` value for a field of `field_type`.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError`] if the value is not an object, if the type
    /// takes no options, or if the object has unknown or mistyped keys.
    pub fn from_value(field_type: &FieldType, value: Value) -> Result<Self, OptionsError> {
        let Value::Object(map) = value else {
            return Err(OptionsError::NotAnObject {
                field_type: field_type.to_string(),
            });
        };

        let invalid = |e: serde_json::Error| OptionsError::Invalid {
            field_type: field_type.to_string(),
            reason: e.to_string(),
        };

        match field_type {
            FieldType::Image => serde_json::from_value(Value::Object(map))
                .map(Self::Image)
                .map_err(invalid),
            FieldType::String => serde_json::from_value(Value::Object(map))
                .map(Self::String)
                .map_err(invalid),
            FieldType::Unknown(_) => Ok(Self::Opaque(map)),
            other => Err(OptionsError::Unsupported {
                field_type: other.to_string(),
            }),
        }
    }

    /// Whether hotspot selection is enabled. Only `image` options can enable it.
    pub fn hotspot(&self) -> bool {
        matches!(self, Self::Image(ImageOptions { hotspot: true }))
    }

    /// The controlled value list of a `string` field, if any.
    pub fn list(&self) -> Option<&[String]> {
        match self {
            Self::String(StringOptions { list: Some(list) }) => Some(list),
            _ => None,
        }
    }
}
