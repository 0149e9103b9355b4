//! # Field Types
//!
//! The closed set of value kinds a field may hold. Descriptors spell the
//! type as a free-form string; anything outside the known set is kept as
//! [`FieldType::Unknown`] so validation can name the offending field instead
//! of failing deserialization with a generic serde error.

use serde::{Deserialize, Serialize};

/// Value kind of a field or array element.
///
/// Serializes to and from the lowercase tag used in descriptors
/// (`"string"`, `"text"`, ...). Unrecognized tags round-trip unchanged
/// through [`FieldType::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Single-line text.
    String,
    /// Multi-line text.
    Text,
    /// Integer or floating point number.
    Number,
    /// Image asset reference, optionally with hotspot/crop annotations.
    Image,
    /// Ordered list whose element types are declared in `of`.
    Array,
    /// `true` / `false`.
    Boolean,
    /// A tag outside the supported set. Always a validation failure.
    Unknown(String),
}

/// Every supported field type, in declaration order.
pub static KNOWN_FIELD_TYPES: [FieldType; 6] = [
    FieldType::String,
    FieldType::Text,
    FieldType::Number,
    FieldType::Image,
    FieldType::Array,
    FieldType::Boolean,
];

impl FieldType {
    /// Returns the descriptor tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Number => "number",
            Self::Image => "image",
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether this is one of the supported types.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Whether values of this type are JSON strings.
    pub fn is_textual(&self) -> bool {
        matches!(self, Self::String | Self::Text)
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "text" => Self::Text,
            "number" => Self::Number,
            "image" => Self::Image,
            "array" => Self::Array,
            "boolean" => Self::Boolean,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match Self::from(tag.as_str()) {
            Self::Unknown(_) => Self::Unknown(tag),
            known => known,
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse_to_variants() {
        for field_type in &KNOWN_FIELD_TYPES {
            assert_eq!(&FieldType::from(field_type.as_str()), field_type);
            assert!(field_type.is_known());
        }
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let parsed = FieldType::from("strnig");
        assert_eq!(parsed, FieldType::Unknown("strnig".to_string()));
        assert!(!parsed.is_known());
        assert_eq!(parsed.to_string(), "strnig");
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!(!FieldType::from("String").is_known());
    }

    #[test]
    fn serde_uses_plain_tag() {
        let json = serde_json::to_string(&FieldType::Boolean).unwrap();
        assert_eq!(json, r#""boolean""#);

        let parsed: FieldType = serde_json::from_str(r#""reference""#).unwrap();
        assert_eq!(parsed, FieldType::Unknown("reference".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#""reference""#);
    }

    #[test]
    fn textual_types() {
        assert!(FieldType::String.is_textual());
        assert!(FieldType::Text.is_textual());
        assert!(!FieldType::Number.is_textual());
    }
}
