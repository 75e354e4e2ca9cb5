//! Row structs and their spreadsheet export projections.
//!
//! Write DTOs are not defined here: inserts and updates take the normalized
//! `Draft` / `Patch` records produced by `vinventory_core::pipeline`.

pub mod ingredient;
pub mod product;

/// Render a boolean for spreadsheet export.
pub(crate) fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}
