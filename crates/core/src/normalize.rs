//! Per-kind value normalizers.
//!
//! Each function takes the raw JSON value for one field (`None` when the key
//! was absent) and returns its canonical stored form or a [`FieldError`].

use serde_json::{Number, Value};

use crate::types::DbId;
use crate::validation::{ErrorCode, FieldError};

/// Required text: trimmed, must be non-empty.
pub fn required_text(field: &str, label: &str, value: Option<&Value>) -> Result<String, FieldError> {
    let required = || format!("{label} is required");
    match value {
        None | Some(Value::Null) => Err(FieldError::new(field, ErrorCode::InvalidType, required())),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(FieldError::new(field, ErrorCode::TooSmall, required()))
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(_) => Err(FieldError::invalid_type(field, "string")),
    }
}

/// Optional text: absent, `null`, `""` and whitespace-only all become `None`.
pub fn optional_text(field: &str, value: Option<&Value>) -> Result<Option<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(blank_to_none(s)),
        Some(_) => Err(FieldError::invalid_type(field, "string")),
    }
}

/// Numeric-as-text: numbers keep their textual form, strings are trimmed.
///
/// Non-numeric strings are accepted as-is so display values like `"<0.5"`
/// survive.
pub fn numeric_text(field: &str, value: Option<&Value>) -> Result<Option<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(number_text(n))),
        Some(Value::String(s)) => Ok(blank_to_none(s)),
        Some(_) => Err(FieldError::invalid_type(field, "number or string")),
    }
}

/// Whole floats (`5.0`, `1e2`) render without a ".0" suffix.
fn number_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Boolean flag, `false` when absent or `null`.
pub fn flag(field: &str, value: Option<&Value>) -> Result<bool, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(FieldError::invalid_type(field, "boolean")),
    }
}

/// Allergen list: an array of strings or a comma-separated string.
///
/// Elements are trimmed and blank elements dropped. Absent or `null` is the
/// empty list.
pub fn allergen_list(field: &str, value: Option<&Value>) -> Result<Vec<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s.split(',').filter_map(blank_to_none).collect()),
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => out.extend(blank_to_none(s)),
                    _ => return Err(FieldError::invalid_type(field, "array of strings")),
                }
            }
            Ok(out)
        }
        Some(_) => Err(FieldError::invalid_type(field, "array of strings")),
    }
}

/// Optional row reference: an integer, or a string holding one.
pub fn reference(field: &str, value: Option<&Value>) -> Result<Option<DbId>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| FieldError::invalid_type(field, "integer id")),
        Some(Value::String(s)) => match blank_to_none(s) {
            None => Ok(None),
            Some(t) => t
                .parse::<DbId>()
                .map(Some)
                .map_err(|_| FieldError::invalid_type(field, "integer id")),
        },
        Some(_) => Err(FieldError::invalid_type(field, "integer id")),
    }
}

fn blank_to_none(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
