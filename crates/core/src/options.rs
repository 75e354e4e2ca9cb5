//! Enumerated option lists published to form clients.
//!
//! These lists guide the UI only; the pipeline stores any trimmed string for
//! the corresponding fields.

use serde::Serialize;

use crate::ingredient::CATEGORY_OPTIONS;
use crate::product::{OPERATOR_TYPE_OPTIONS, WINE_TYPE_OPTIONS};

/// Payload of `GET /api/options`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOptions {
    pub wine_type_options: &'static [&'static str],
    pub operator_type_options: &'static [&'static str],
    pub category_options: &'static [&'static str],
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            wine_type_options: WINE_TYPE_OPTIONS,
            operator_type_options: OPERATOR_TYPE_OPTIONS,
            category_options: CATEGORY_OPTIONS,
        }
    }
}
