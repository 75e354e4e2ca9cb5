//! Product schema.

use serde_json::Value;

use crate::pipeline;
use crate::schema::{Draft, FieldDef, FieldKind, Patch, Schema};
use crate::validation::ValidationErrors;

/// Marker for the `products` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductSchema;

/// A normalized product ready for insert.
pub type NewProduct = Draft<ProductSchema>;

/// A normalized partial product update.
pub type ProductPatch = Patch<ProductSchema>;

use FieldKind::{Flag, NumericText, OptionalText, Reference, RequiredText};

/// Writable product columns, in export order.
pub const PRODUCT_FIELDS: &[FieldDef] = &[
    FieldDef::new("name", "Name", RequiredText).with_aliases(&["product_name", "product", "wine"]),
    FieldDef::new("brand", "Brand", OptionalText).with_aliases(&["producer", "winery"]),
    FieldDef::new("volume", "Volume", OptionalText).with_aliases(&["size", "bottle_size"]),
    FieldDef::new("vintage", "Vintage", OptionalText).with_aliases(&["year"]),
    FieldDef::new("wine_type", "Wine Type", OptionalText).with_aliases(&["type"]),
    FieldDef::new("sugar_content", "Sugar Content", OptionalText).with_aliases(&["sugar", "sweetness"]),
    FieldDef::new("appellation", "Appellation", OptionalText).with_aliases(&["region"]),
    FieldDef::new("alcohol_content", "Alcohol Content", OptionalText)
        .with_aliases(&["alcohol", "abv", "alcohol_percentage"]),
    FieldDef::new("country_of_origin", "Country of Origin", OptionalText)
        .with_aliases(&["country", "origin"]),
    FieldDef::new("sku", "SKU", OptionalText),
    FieldDef::new("ean", "EAN", OptionalText).with_aliases(&["barcode", "ean_code", "gtin"]),
    FieldDef::new("packaging_gases", "Packaging Gases", OptionalText)
        .with_aliases(&["packaging_gas"]),
    FieldDef::new("portion_size", "Portion Size", OptionalText).with_aliases(&["portion", "serving_size"]),
    FieldDef::new("energy_kcal", "Energy (kcal)", NumericText)
        .with_aliases(&["kcal", "calories"]),
    FieldDef::new("energy_kj", "Energy (kJ)", NumericText).with_aliases(&["kj"]),
    FieldDef::new("fat", "Fat", NumericText),
    FieldDef::new("saturated_fat", "Saturated Fat", NumericText).with_aliases(&["saturates"]),
    FieldDef::new("carbohydrates", "Carbohydrates", NumericText).with_aliases(&["carbs", "carbohydrate"]),
    FieldDef::new("sugars", "Sugars", NumericText),
    FieldDef::new("protein", "Protein", NumericText),
    FieldDef::new("salt", "Salt", NumericText),
    FieldDef::new("organic", "Organic", Flag).with_aliases(&["is_organic", "bio"]),
    FieldDef::new("vegetarian", "Vegetarian", Flag).with_aliases(&["is_vegetarian"]),
    FieldDef::new("vegan", "Vegan", Flag).with_aliases(&["is_vegan"]),
    FieldDef::new("operator_type", "Operator Type", OptionalText),
    FieldDef::new("operator_name", "Operator Name", OptionalText).with_aliases(&["operator"]),
    FieldDef::new("operator_address", "Operator Address", OptionalText),
    FieldDef::new("operator_info", "Operator Info", OptionalText)
        .with_aliases(&["operator_information", "business_operator"]),
    FieldDef::new("external_link", "External Link", OptionalText).with_aliases(&["link", "url"]),
    FieldDef::new("redirect_link", "Redirect Link", OptionalText).with_aliases(&["redirect_url"]),
    FieldDef::new("image_url", "Image URL", OptionalText).with_aliases(&["image"]),
    FieldDef::new("created_by", "Created By", Reference),
];

/// Wine types offered by the product form.
pub const WINE_TYPE_OPTIONS: &[&str] = &[
    "Red",
    "White",
    "Rosé",
    "Sparkling",
    "Dessert",
    "Fortified",
    "Orange",
];

/// Food business operator roles offered by the product form.
pub const OPERATOR_TYPE_OPTIONS: &[&str] = &[
    "Producer",
    "Bottler",
    "Importer",
    "Distributor",
    "Seller",
];

impl Schema for ProductSchema {
    const ENTITY: &'static str = "Product";

    fn fields() -> &'static [FieldDef] {
        PRODUCT_FIELDS
    }
}

/// Normalize a product create payload.
pub fn normalize_new_product(input: &Value) -> Result<NewProduct, ValidationErrors> {
    pipeline::normalize_create(input)
}

/// Normalize a product update payload.
pub fn normalize_product_patch(input: &Value) -> Result<ProductPatch, ValidationErrors> {
    pipeline::normalize_patch(input)
}
