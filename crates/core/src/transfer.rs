//! Spreadsheet import mapping.
//!
//! Maps loosely-keyed worksheet rows onto an entity schema and runs each row
//! through the create pipeline. Rows that cannot be imported are reported as
//! `"Row N: <reason>"`, where `N` is the 1-based worksheet row (the header is
//! row 1, so the first data row is row 2).

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::pipeline;
use crate::schema::{Draft, FieldDef, FieldKind, Schema};
use crate::spreadsheet::Sheet;

/// Worksheet row number of the first data row.
pub const FIRST_DATA_ROW: usize = 2;

/// Cell values treated as `true` for boolean columns (compared lowercase).
const TRUTHY: &[&str] = &["true", "yes", "y", "1", "x", "ja", "oui"];

/// Canonical form of a header cell: lowercase ASCII alphanumerics joined by
/// single underscores. `" Product Name "`, `"product-name"` and
/// `"PRODUCT_NAME"` all become `"product_name"`.
pub fn header_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    key
}

/// Whether a boolean cell reads as true.
pub fn parse_flag_cell(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    TRUTHY.contains(&lowered.as_str())
}

/// Format a per-row import error line.
pub fn row_error(row_number: usize, reason: impl std::fmt::Display) -> String {
    format!("Row {row_number}: {reason}")
}

/// Outcome of mapping one data row.
#[derive(Debug, Clone)]
pub struct ImportRow<E> {
    /// 1-based worksheet row number.
    pub row_number: usize,
    /// The normalized record, or the reason the row is skipped.
    pub outcome: Result<Draft<E>, String>,
}

/// Resolve which worksheet column feeds which schema field.
///
/// A header matches a field when its [`header_key`] equals the field name,
/// the field label, or one of the field aliases. The first matching column
/// wins.
pub fn resolve_columns<E: Schema>(headers: &[String]) -> HashMap<&'static str, usize> {
    let keys: Vec<String> = headers.iter().map(|h| header_key(h)).collect();
    let mut columns = HashMap::new();

    for def in E::fields() {
        let wanted = accepted_keys(def);
        if let Some(idx) = keys.iter().position(|k| wanted.iter().any(|w| w == k)) {
            columns.insert(def.name, idx);
        }
    }
    columns
}

fn accepted_keys(def: &FieldDef) -> Vec<String> {
    let mut keys = vec![def.name.to_string(), header_key(def.label)];
    keys.extend(def.aliases.iter().map(|a| (*a).to_string()));
    keys
}

/// Map every data row of `sheet` onto `E` and normalize it.
///
/// Rows where every cell is blank are dropped without an error.
pub fn prepare_import<E: Schema>(sheet: &Sheet) -> Vec<ImportRow<E>> {
    let columns = resolve_columns::<E>(&sheet.headers);

    sheet
        .rows
        .iter()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|(idx, cells)| ImportRow {
            row_number: idx + FIRST_DATA_ROW,
            outcome: map_row::<E>(&columns, cells),
        })
        .collect()
}

fn map_row<E: Schema>(
    columns: &HashMap<&'static str, usize>,
    cells: &[String],
) -> Result<Draft<E>, String> {
    let mut object = Map::new();

    for def in E::fields() {
        let Some(raw) = columns.get(def.name).and_then(|&idx| cells.get(idx)) else {
            continue;
        };
        let value = match def.kind {
            FieldKind::Flag => Value::Bool(parse_flag_cell(raw)),
            _ => Value::String(raw.clone()),
        };
        object.insert(def.name.to_string(), value);
    }

    let has_name = object
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.trim().is_empty());
    if !has_name {
        return Err("Name is required".to_string());
    }

    pipeline::normalize_create::<E>(&Value::Object(object)).map_err(|e| e.to_string())
}
