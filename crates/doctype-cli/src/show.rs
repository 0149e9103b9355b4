//! # Show / Field Subcommands
//!
//! Read-only inspection of registered document types.

use std::fmt;

use anyhow::Result;
use clap::Args;

use doctype_schema::{FieldDescriptor, SchemaDescriptor, SchemaRegistry};

/// Arguments for the `doctype show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Registered schema name. Lists all schemas when omitted.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

/// Arguments for the `doctype field` subcommand.
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Registered schema name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Field name within the schema.
    #[arg(value_name = "FIELD")]
    pub field: String,
}

/// Execute the show subcommand.
///
/// Returns exit code: 0 on success, 1 if the schema is not registered.
pub fn run_show(args: &ShowArgs, registry: &SchemaRegistry) -> Result<u8> {
    let Some(name) = &args.name else {
        for descriptor in registry.iter() {
            println!(
                "{} ({}, {} fields): {}",
                descriptor.name,
                descriptor.kind,
                descriptor.fields.len(),
                descriptor.title
            );
        }
        return Ok(0);
    };

    match registry.get(name) {
        Some(descriptor) => {
            print!("{}", FieldTable(descriptor));
            Ok(0)
        }
        None => {
            println!("unknown schema '{name}'; registered: {}", registry.names().join(", "));
            Ok(1)
        }
    }
}

/// Execute the field subcommand.
///
/// Returns exit code: 0 on success, 1 if the schema or field is not found.
pub fn run_field(args: &FieldArgs, registry: &SchemaRegistry) -> Result<u8> {
    match lookup_field(registry, &args.name, &args.field) {
        Ok(field) => {
            println!("{}", describe_type(field));
            Ok(0)
        }
        Err(message) => {
            println!("{message}");
            Ok(1)
        }
    }
}

/// Find a field, or explain which lookup step failed.
pub fn lookup_field<'a>(
    registry: &'a SchemaRegistry,
    schema: &str,
    field: &str,
) -> Result<&'a FieldDescriptor, String> {
    let descriptor = registry
        .get(schema)
        .ok_or_else(|| format!("unknown schema '{schema}'"))?;
    descriptor
        .field(field)
        .ok_or_else(|| format!("field not found: '{field}' in schema '{schema}'"))
}

/// Type of a field as shown to schema authors, e.g. `array<string>` or `image (hotspot)`.
pub fn describe_type(field: &FieldDescriptor) -> String {
    let mut out = field.field_type.to_string();

    let elements: Vec<String> = field.element_types().map(ToString::to_string).collect();
    if !elements.is_empty() {
        out.push_str(&format!("<{}>", elements.join("|")));
    }

    if field.hotspot_enabled() {
        out.push_str(" (hotspot)");
    }
    if let Some(list) = field.options.as_ref().and_then(|o| o.list()) {
        out.push_str(&format!(" [{}]", list.join(", ")));
    }

    out
}

/// Field table of a descriptor, one line per field in form order.
pub struct FieldTable<'a>(pub &'a SchemaDescriptor);

impl fmt::Display for FieldTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.0;
        let width = descriptor
            .fields
            .iter()
            .map(|field| field.name.len())
            .max()
            .unwrap_or(0);

        writeln!(f, "{} ({}): {}", descriptor.name, descriptor.kind, descriptor.title)?;
        for field in &descriptor.fields {
            writeln!(
                f,
                "  {:<width$}  {:<24}  {}",
                field.name,
                describe_type(field),
                field.title
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctype_schema::{product_schema, FieldOptions, FieldType, StringOptions};

    fn registry() -> SchemaRegistry {
        SchemaRegistry::with_builtin().unwrap()
    }

    #[test]
    fn describes_product_field_types() {
        let product = product_schema();
        assert_eq!(describe_type(product.field("sku").unwrap()), "string");
        assert_eq!(describe_type(product.field("features").unwrap()), "array<string>");
        assert_eq!(describe_type(product.field("imageUrl").unwrap()), "image (hotspot)");
    }

    #[test]
    fn lookup_reports_missing_field() {
        let registry = registry();
        assert_eq!(
            lookup_field(&registry, "product", "price").unwrap().field_type.as_str(),
            "number"
        );
        let err = lookup_field(&registry, "product", "weight").unwrap_err();
        assert!(err.starts_with("field not found"));
        assert!(lookup_field(&registry, "brand", "label").is_err());
    }

    #[test]
    fn table_lists_fields_in_order() {
        let table = FieldTable(product_schema()).to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("product (document)"));
        assert!(lines[1].trim_start().starts_with("name"));
        assert!(lines[11].contains("Same Day Delivery"));
    }

    #[test]
    fn describes_controlled_list() {
        let tone = FieldDescriptor::new("tone", "Tone", FieldType::String).with_options(
            FieldOptions::String(StringOptions {
                list: Some(vec!["warm".into(), "cool".into()]),
            }),
        );
        assert_eq!(describe_type(&tone), "string [warm, cool]");
    }

    #[test]
    fn exit_codes() {
        let registry = registry();
        assert_eq!(run_show(&ShowArgs { name: None }, &registry).unwrap(), 0);
        assert_eq!(
            run_show(&ShowArgs { name: Some("product".into()) }, &registry).unwrap(),
            0
        );
        assert_eq!(
            run_show(&ShowArgs { name: Some("brand".into()) }, &registry).unwrap(),
            1
        );
        let weight = FieldArgs {
            name: "product".into(),
            field: "weight".into(),
        };
        assert_eq!(run_field(&weight, &registry).unwrap(), 1);
    }
}
