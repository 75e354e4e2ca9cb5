//! The normalization pipeline shared by create and partial update.
//!
//! Input is an untyped JSON object as submitted by a client. Output is either
//! a [`Draft`] / [`Patch`] of canonical values or the full list of failing
//! fields. Unknown keys are ignored.

use serde_json::{Map, Value};

use crate::normalize;
use crate::schema::{Draft, FieldDef, FieldKind, FieldMap, FieldValue, Patch, Schema};
use crate::validation::{FieldError, ValidationErrors};

/// Field name reported when the body itself is not a JSON object.
pub const BODY_FIELD: &str = "body";

/// Whether absent fields take their defaults or are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Create,
    Patch,
}

/// Normalize a create payload. Every schema field ends up in the draft.
pub fn normalize_create<E: Schema>(input: &Value) -> Result<Draft<E>, ValidationErrors> {
    let object = as_object(input)?;
    run::<E>(object, Mode::Create).map(Draft::from_values)
}

/// Normalize a partial-update payload. Only supplied fields end up in the
/// patch.
pub fn normalize_patch<E: Schema>(input: &Value) -> Result<Patch<E>, ValidationErrors> {
    let object = as_object(input)?;
    run::<E>(object, Mode::Patch).map(Patch::from_values)
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    input
        .as_object()
        .ok_or_else(|| ValidationErrors::single(FieldError::invalid_type(BODY_FIELD, "object")))
}

fn run<E: Schema>(object: &Map<String, Value>, mode: Mode) -> Result<FieldMap, ValidationErrors> {
    let mut values = FieldMap::default();
    let mut errors = ValidationErrors::new();

    for def in E::fields() {
        let raw = object.get(def.name);
        if raw.is_none() && mode == Mode::Patch {
            continue;
        }
        match normalize_field(def, raw) {
            Ok(value) => values.insert(def.name, value),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

fn normalize_field(def: &FieldDef, raw: Option<&Value>) -> Result<FieldValue, FieldError> {
    let field = def.name;
    match def.kind {
        FieldKind::RequiredText => {
            normalize::required_text(field, def.label, raw).map(|s| FieldValue::Text(Some(s)))
        }
        FieldKind::OptionalText => normalize::optional_text(field, raw).map(FieldValue::Text),
        FieldKind::NumericText => normalize::numeric_text(field, raw).map(FieldValue::Text),
        FieldKind::Flag => normalize::flag(field, raw).map(FieldValue::Flag),
        FieldKind::AllergenList => normalize::allergen_list(field, raw).map(FieldValue::List),
        FieldKind::Reference => normalize::reference(field, raw).map(FieldValue::Id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::IngredientSchema;
    use crate::product::ProductSchema;
    use serde_json::json;

    #[test]
    fn create_fills_every_field() {
        let draft = normalize_create::<ProductSchema>(&json!({ "name": "Merlot" })).unwrap();

        assert_eq!(draft.values().len(), ProductSchema::fields().len());
        assert_eq!(draft.text("name"), Some("Merlot"));
        assert_eq!(draft.get("brand"), Some(&FieldValue::Text(None)));
        assert_eq!(draft.get("vegan"), Some(&FieldValue::Flag(false)));
        assert_eq!(draft.get("created_by"), Some(&FieldValue::Id(None)));
    }

    #[test]
    fn create_flags_default_independently() {
        let draft =
            normalize_create::<ProductSchema>(&json!({ "name": "Cava", "organic": true })).unwrap();
        let json = draft.to_json();

        assert_eq!(json["organic"], true);
        assert_eq!(json["vegetarian"], false);
        assert_eq!(json["vegan"], false);
    }

    #[test]
    fn create_reports_every_failing_field() {
        let errors = normalize_create::<ProductSchema>(&json!({
            "name": "  ",
            "brand": 42,
            "vegan": "yes",
        }))
        .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.has_field("name"));
        assert!(errors.has_field("brand"));
        assert!(errors.has_field("vegan"));
    }

    #[test]
    fn empty_name_is_rejected_naming_the_field() {
        let errors = normalize_create::<ProductSchema>(&json!({ "name": "" })).unwrap_err();
        assert!(errors.has_field("name"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let draft = normalize_create::<IngredientSchema>(&json!({
            "id": 99,
            "name": "Sulphur dioxide",
            "created_at": "2024-01-01T00:00:00Z",
            "colour": "none",
        }))
        .unwrap();

        assert!(draft.get("id").is_none());
        assert!(draft.get("colour").is_none());
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = normalize_create::<ProductSchema>(&json!(["name"])).unwrap_err();
        assert!(errors.has_field(BODY_FIELD));
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize_create::<ProductSchema>(&json!({
            "name": "  Barolo ",
            "brand": " ",
            "vintage": " 2016",
            "energy_kcal": 83,
            "organic": true,
        }))
        .unwrap();
        let second =
            normalize_create::<ProductSchema>(&Value::Object(first.to_json())).unwrap();

        assert_eq!(first, second);

        let first = normalize_create::<IngredientSchema>(&json!({
            "name": "Egg white",
            "allergens": "egg , milk",
        }))
        .unwrap();
        let second =
            normalize_create::<IngredientSchema>(&Value::Object(first.to_json())).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn patch_contains_only_supplied_fields() {
        let patch = normalize_patch::<ProductSchema>(&json!({ "sku": "X" })).unwrap();

        assert_eq!(patch.values().len(), 1);
        assert_eq!(patch.get("sku"), Some(&FieldValue::Text(Some("X".into()))));
        assert!(!patch.contains("name"));
        assert!(!patch.contains("vegan"));
    }

    #[test]
    fn patch_can_clear_optional_fields() {
        let patch = normalize_patch::<ProductSchema>(&json!({ "brand": "", "ean": null })).unwrap();

        assert_eq!(patch.get("brand"), Some(&FieldValue::Text(None)));
        assert_eq!(patch.get("ean"), Some(&FieldValue::Text(None)));
    }

    #[test]
    fn patch_still_enforces_required_name_when_present() {
        let errors = normalize_patch::<ProductSchema>(&json!({ "name": " " })).unwrap_err();
        assert!(errors.has_field("name"));
    }

    #[test]
    fn empty_patch_is_empty() {
        let patch = normalize_patch::<IngredientSchema>(&json!({})).unwrap();
        assert!(patch.is_empty());
    }
}
