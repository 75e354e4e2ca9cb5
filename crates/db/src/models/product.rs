//! Product row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vinventory_core::types::{DbId, Timestamp};

use super::yes_no;

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub brand: Option<String>,
    pub volume: Option<String>,
    pub vintage: Option<String>,
    pub wine_type: Option<String>,
    pub sugar_content: Option<String>,
    pub appellation: Option<String>,
    pub alcohol_content: Option<String>,
    pub country_of_origin: Option<String>,
    pub sku: Option<String>,
    pub ean: Option<String>,
    pub packaging_gases: Option<String>,
    pub portion_size: Option<String>,
    pub energy_kcal: Option<String>,
    pub energy_kj: Option<String>,
    pub fat: Option<String>,
    pub saturated_fat: Option<String>,
    pub carbohydrates: Option<String>,
    pub sugars: Option<String>,
    pub protein: Option<String>,
    pub salt: Option<String>,
    pub organic: bool,
    pub vegetarian: bool,
    pub vegan: bool,
    pub operator_type: Option<String>,
    pub operator_name: Option<String>,
    pub operator_address: Option<String>,
    pub operator_info: Option<String>,
    pub external_link: Option<String>,
    pub redirect_link: Option<String>,
    pub image_url: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Header row of the product export.
pub const PRODUCT_EXPORT_HEADERS: &[&str] = &[
    "ID",
    "Name",
    "Brand",
    "Volume",
    "Vintage",
    "Wine Type",
    "Sugar Content",
    "Appellation",
    "Alcohol Content",
    "Country of Origin",
    "SKU",
    "EAN",
    "Packaging Gases",
    "Portion Size",
    "Energy (kcal)",
    "Energy (kJ)",
    "Fat",
    "Saturated Fat",
    "Carbohydrates",
    "Sugars",
    "Protein",
    "Salt",
    "Organic",
    "Vegetarian",
    "Vegan",
    "Operator Type",
    "Operator Name",
    "Operator Address",
    "Operator Info",
    "External Link",
    "Redirect Link",
    "Image URL",
    "Created At",
];

impl Product {
    /// Flatten to one export row, aligned with [`PRODUCT_EXPORT_HEADERS`].
    pub fn export_row(&self) -> Vec<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.id.to_string(),
            self.name.clone(),
            text(&self.brand),
            text(&self.volume),
            text(&self.vintage),
            text(&self.wine_type),
            text(&self.sugar_content),
            text(&self.appellation),
            text(&self.alcohol_content),
            text(&self.country_of_origin),
            text(&self.sku),
            text(&self.ean),
            text(&self.packaging_gases),
            text(&self.portion_size),
            text(&self.energy_kcal),
            text(&self.energy_kj),
            text(&self.fat),
            text(&self.saturated_fat),
            text(&self.carbohydrates),
            text(&self.sugars),
            text(&self.protein),
            text(&self.salt),
            yes_no(self.organic),
            yes_no(self.vegetarian),
            yes_no(self.vegan),
            text(&self.operator_type),
            text(&self.operator_name),
            text(&self.operator_address),
            text(&self.operator_info),
            text(&self.external_link),
            text(&self.redirect_link),
            text(&self.image_url),
            self.created_at.to_rfc3339(),
        ]
    }
}
