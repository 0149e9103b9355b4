//! # Product Document Type
//!
//! The built-in `product` descriptor. It is built on first use and shared
//! for the life of the process; nothing can mutate it afterwards.
//!
//! The same descriptor is checked in as `schemas/product.schema.json` for
//! tooling that reads schemas from disk. The two must stay identical.

use std::sync::OnceLock;

use crate::descriptor::{FieldDescriptor, SchemaDescriptor};
use crate::field_type::FieldType;
use crate::options::{FieldOptions, ImageOptions};

/// Registry name of the Product document type.
pub const PRODUCT_SCHEMA_NAME: &str = "product";

static PRODUCT: OnceLock<SchemaDescriptor> = OnceLock::new();

/// The Product document type.
pub fn product_schema() -> &'static SchemaDescriptor {
    PRODUCT.get_or_init(build_product)
}

fn build_product() -> SchemaDescriptor {
    SchemaDescriptor::document(
        PRODUCT_SCHEMA_NAME,
        "Product",
        vec![
            FieldDescriptor::new("name", "Name", FieldType::String),
            FieldDescriptor::new("sku", "SKU", FieldType::String),
            FieldDescriptor::new("description", "Description", FieldType::Text),
            FieldDescriptor::new("price", "Price", FieldType::Number),
            // category and subType are free text; no controlled taxonomy yet.
            FieldDescriptor::new("category", "Category", FieldType::String),
            FieldDescriptor::new("subType", "Sub Type", FieldType::String),
            FieldDescriptor::new("imageUrl", "Main Image", FieldType::Image)
                .with_options(FieldOptions::Image(ImageOptions { hotspot: true })),
            FieldDescriptor::array("features", "Features", [FieldType::String]),
            FieldDescriptor::new("stockQuantity", "Stock Quantity", FieldType::Number),
            FieldDescriptor::new("colorName", "Color Name", FieldType::String),
            FieldDescriptor::new("hasSameDayDelivery", "Same Day Delivery", FieldType::Boolean),
        ],
    )
}
