//! # Descriptor Validation
//!
//! Structural checks a schema registry applies before accepting a
//! descriptor. Validation never stops at the first problem: every violation
//! is collected with the path of the offending node so the schema author can
//! fix them in one pass.
//!
//! ## Rules
//!
//! - Field names are unique within a descriptor.
//! - Field and element types belong to the supported set.
//! - `array` fields declare at least one element type in `of`.
//! - `of` appears only on `array` fields, and never nests another `array`.
//! - Descriptor and field names are identifiers (ASCII letter or `_`, then
//!   ASCII alphanumerics or `_`, at most [`MAX_NAME_LEN`] bytes). Field
//!   names may not start with `_`, which is reserved for system properties.
//! - A descriptor declares at least one field.
//! - A `string` field's option `list`, when present, is not empty.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::descriptor::SchemaDescriptor;
use crate::field_type::FieldType;

/// Maximum length for descriptor and field names.
pub const MAX_NAME_LEN: usize = 64;

/// What is wrong at a given path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Two fields share a name.
    #[error("duplicate field name '{name}' (first declared at /fields/{first})")]
    DuplicateFieldName {
        /// The repeated name.
        name: String,
        /// Index of the first field with this name.
        first: usize,
    },

    /// A field or element type is outside the supported set.
    #[error("field '{field}' has unknown type '{type_name}'")]
    UnknownFieldType {
        /// Owning field.
        field: String,
        /// The unrecognized tag.
        type_name: String,
    },

    /// An `array` field has no element types.
    #[error("array field '{field}' must declare at least one element type in 'of'")]
    MissingArrayElementType {
        /// The array field.
        field: String,
    },

    /// A non-array field declares `of`.
    #[error("field '{field}' of type '{field_type}' declares 'of'; only array fields may")]
    UnexpectedElementType {
        /// The offending field.
        field: String,
        /// Its declared type.
        field_type: String,
    },

    /// An array element type is itself `array`.
    #[error("array field '{field}' cannot contain arrays directly")]
    NestedArray {
        /// The array field.
        field: String,
    },

    /// A name is not a valid identifier.
    #[error("invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Which identifier rule it breaks.
        reason: String,
    },

    /// The descriptor has no fields.
    #[error("schema declares no fields")]
    EmptyFields,

    /// A controlled value list with no entries; no value could be stored.
    #[error("field '{field}' restricts its value to an empty list")]
    EmptyOptionList {
        /// The restricted field.
        field: String,
    },
}

/// A single violation with the path of the offending node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path into the descriptor, e.g. `/fields/7/of/0`.
    pub path: String,
    /// The rule that was broken.
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "  (root): {}", self.kind)
        } else {
            write!(f, "  {}: {}", self.path, self.kind)
        }
    }
}

/// Collection of descriptor violations, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Iterate over the violation kinds.
    pub fn kinds(&self) -> impl Iterator<Item = &ViolationKind> {
        self.violations.iter().map(|v| &v.kind)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }

    fn push(&mut self, path: impl Into<String>, kind: ViolationKind) {
        self.violations.push(Violation {
            path: path.into(),
            kind,
        });
    }
}

impl fmt::Display for ValidationViolations {
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

/// Check every structural rule and return all violations found.
///
/// # Errors
///
/// Returns the full [`ValidationViolations`] list when any rule is broken.
pub fn validate_descriptor(descriptor: &SchemaDescriptor) -> Result<(), ValidationViolations> {
    let mut errors = ValidationViolations::default();

    if let Err(reason) = check_identifier(&descriptor.name) {
        errors.push(
            "/name",
            ViolationKind::InvalidName {
                name: descriptor.name.clone(),
                reason,
            },
        );
    }

    if descriptor.fields.is_empty() {
        errors.push("/fields", ViolationKind::EmptyFields);
    }

    let mut first_index: HashMap<&str, usize> = HashMap::new();

    for (index, field) in descriptor.fields.iter().enumerate() {
        let path = format!("/fields/{index}");

        if let Err(reason) = check_field_name(&field.name) {
            errors.push(
                format!("{path}/name"),
                ViolationKind::InvalidName {
                    name: field.name.clone(),
                    reason,
                },
            );
        }

        if let Some(&first) = first_index.get(field.name.as_str()) {
            errors.push(
                format!("{path}/name"),
                ViolationKind::DuplicateFieldName {
                    name: field.name.clone(),
                    first,
                },
            );
        } else {
            first_index.insert(&field.name, index);
        }

        if let FieldType::Unknown(tag) = &field.field_type {
            errors.push(
                format!("{path}/type"),
                ViolationKind::UnknownFieldType {
                    field: field.name.clone(),
                    type_name: tag.clone(),
                },
            );
        }

        match (&field.field_type, &field.of) {
            (FieldType::Array, None) => {
                errors.push(
                    path.clone(),
                    ViolationKind::MissingArrayElementType {
                        field: field.name.clone(),
                    },
                );
            }
            (FieldType::Array, Some(of)) if of.is_empty() => {
                errors.push(
                    format!("{path}/of"),
                    ViolationKind::MissingArrayElementType {
                        field: field.name.clone(),
                    },
                );
            }
            (FieldType::Array, Some(_)) => {}
            (other, Some(_)) => {
                errors.push(
                    format!("{path}/of"),
                    ViolationKind::UnexpectedElementType {
                        field: field.name.clone(),
                        field_type: other.to_string(),
                    },
                );
            }
            (_, None) => {}
        }

        if field
            .options
            .as_ref()
            .and_then(|o| o.list())
            .is_some_and(|list| list.is_empty())
        {
            errors.push(
                format!("{path}/options/list"),
                ViolationKind::EmptyOptionList {
                    field: field.name.clone(),
                },
            );
        }

        for (element_index, element) in field.of.iter().flatten().enumerate() {
            let element_path = format!("{path}/of/{element_index}/type");
            match &element.field_type {
                FieldType::Unknown(tag) => errors.push(
                    element_path,
                    ViolationKind::UnknownFieldType {
                        field: field.name.clone(),
                        type_name: tag.clone(),
                    },
                ),
                FieldType::Array => errors.push(
                    element_path,
                    ViolationKind::NestedArray {
                        field: field.name.clone(),
                    },
                ),
                _ => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err("name is empty".to_string());
    };
    if name.len() > MAX_NAME_LEN {
        return Err(format!("exceeds max length {MAX_NAME_LEN}"));
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err("must start with an ASCII letter or '_'".to_string());
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("contains invalid character {bad:?}"));
    }
    Ok(())
}

fn check_field_name(name: &str) -> Result<(), String> {
    check_identifier(name)?;
    if name.starts_with('_') {
        return Err("names starting with '_' are reserved for system properties".to_string());
    }
    Ok(())
}
