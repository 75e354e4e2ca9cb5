//! Ingredient schema.

use serde_json::Value;

use crate::pipeline;
use crate::schema::{Draft, FieldDef, FieldKind, Patch, Schema};
use crate::validation::ValidationErrors;

/// Marker for the `ingredients` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngredientSchema;

/// A normalized ingredient ready for insert.
pub type NewIngredient = Draft<IngredientSchema>;

/// A normalized partial ingredient update.
pub type IngredientPatch = Patch<IngredientSchema>;

/// Writable ingredient columns, in export order.
pub const INGREDIENT_FIELDS: &[FieldDef] = &[
    FieldDef::new("name", "Name", FieldKind::RequiredText)
        .with_aliases(&["ingredient", "ingredient_name"]),
    FieldDef::new("category", "Category", FieldKind::OptionalText).with_aliases(&["type", "group"]),
    FieldDef::new("e_number", "E-Number", FieldKind::OptionalText)
        .with_aliases(&["enumber", "e_code", "e_no", "code"]),
    FieldDef::new("details", "Details", FieldKind::OptionalText)
        .with_aliases(&["description", "notes"]),
    FieldDef::new("allergens", "Allergens", FieldKind::AllergenList).with_aliases(&["allergen"]),
    FieldDef::new("created_by", "Created By", FieldKind::Reference),
];

/// Ingredient categories offered by the ingredient form.
pub const CATEGORY_OPTIONS: &[&str] = &[
    "Grapes",
    "Acidity regulators",
    "Preservatives and antioxidants",
    "Stabilising agents",
    "Enrichment substances",
    "Clarification agents",
    "Packaging gases",
    "Other",
];

impl Schema for IngredientSchema {
    const ENTITY: &'static str = "Ingredient";

    fn fields() -> &'static [FieldDef] {
        INGREDIENT_FIELDS
    }
}

/// Normalize an ingredient create payload.
pub fn normalize_new_ingredient(input: &Value) -> Result<NewIngredient, ValidationErrors> {
    pipeline::normalize_create(input)
}

/// Normalize an ingredient update payload.
pub fn normalize_ingredient_patch(input: &Value) -> Result<IngredientPatch, ValidationErrors> {
    pipeline::normalize_patch(input)
}
