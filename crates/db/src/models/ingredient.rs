//! Ingredient row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vinventory_core::types::{DbId, Timestamp};

/// A row from the `ingredients` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub e_number: Option<String>,
    pub details: Option<String>,
    /// Never NULL; an ingredient without allergens has `[]`.
    pub allergens: Vec<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Header row of the ingredient export.
pub const INGREDIENT_EXPORT_HEADERS: &[&str] = &[
    "ID",
    "Name",
    "Category",
    "E-Number",
    "Details",
    "Allergens",
    "Created At",
];

impl Ingredient {
    /// Flatten to one export row, aligned with [`INGREDIENT_EXPORT_HEADERS`].
    pub fn export_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category.clone().unwrap_or_default(),
            self.e_number.clone().unwrap_or_default(),
            self.details.clone().unwrap_or_default(),
            self.allergens.join(", "),
            self.created_at.to_rfc3339(),
        ]
    }
}
