//! Spreadsheet import and export for products and ingredients.
//!
//! Workbook parsing and encoding run on the blocking pool. Imports insert the
//! valid rows one at a time, in sheet order, without a transaction; a failed
//! row is reported and the import carries on.

use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vinventory_core::ingredient::IngredientSchema;
use vinventory_core::product::ProductSchema;
use vinventory_core::spreadsheet::{read_first_sheet, write_sheet, Sheet, XLSX_CONTENT_TYPE};
use vinventory_core::transfer::{prepare_import, row_error};
use vinventory_db::models::ingredient::{Ingredient, INGREDIENT_EXPORT_HEADERS};
use vinventory_db::models::product::{Product, PRODUCT_EXPORT_HEADERS};

use crate::error::{AppError, AppResult};
use crate::handlers::read_file_field;
use crate::state::AppState;

/// Multipart field carrying the workbook.
const FILE_FIELD: &str = "file";

/// Result of a product import.
#[derive(Debug, Serialize)]
pub struct ProductImportSummary {
    pub success: bool,
    pub imported: usize,
    pub errors: Vec<String>,
    pub products: Vec<Product>,
}

/// Result of an ingredient import.
#[derive(Debug, Serialize)]
pub struct IngredientImportSummary {
    pub success: bool,
    pub imported: usize,
    pub errors: Vec<String>,
    pub ingredients: Vec<Ingredient>,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// GET /api/products/export
pub async fn export_products(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products = state.catalog.list_products().await?;
    let rows: Vec<Vec<String>> = products.iter().map(Product::export_row).collect();

    let bytes = encode_workbook("Products", PRODUCT_EXPORT_HEADERS, rows).await?;
    tracing::info!(count = products.len(), "Products exported");
    Ok(attachment("products.xlsx", bytes))
}

/// GET /api/ingredients/export
pub async fn export_ingredients(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ingredients = state.catalog.list_ingredients().await?;
    let rows: Vec<Vec<String>> = ingredients.iter().map(Ingredient::export_row).collect();

    let bytes = encode_workbook("Ingredients", INGREDIENT_EXPORT_HEADERS, rows).await?;
    tracing::info!(count = ingredients.len(), "Ingredients exported");
    Ok(attachment("ingredients.xlsx", bytes))
}

async fn encode_workbook(
    sheet_name: &'static str,
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
) -> AppResult<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || write_sheet(sheet_name, headers, &rows))
        .await
        .map_err(|e| AppError::InternalError(format!("Export task failed: {e}")))??;
    Ok(bytes)
}

fn attachment(file_name: &str, bytes: Vec<u8>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// POST /api/products/import
///
/// Multipart form with a `file` workbook. Returns the import summary even
/// when some rows fail; an unreadable workbook is a 400.
pub async fn import_products(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProductImportSummary>> {
    let sheet = read_upload(&mut multipart).await?;

    let mut products = Vec::new();
    let mut errors = Vec::new();
    for row in prepare_import::<ProductSchema>(&sheet) {
        let draft = match row.outcome {
            Ok(draft) => draft,
            Err(reason) => {
                errors.push(row_error(row.row_number, reason));
                continue;
            }
        };
        match state.catalog.create_product(&draft).await {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::warn!(row = row.row_number, error = %e, "Product import row failed");
                errors.push(row_error(row.row_number, e));
            }
        }
    }

    tracing::info!(imported = products.len(), failed = errors.len(), "Products imported");
    Ok(Json(ProductImportSummary {
        success: true,
        imported: products.len(),
        errors,
        products,
    }))
}

/// POST /api/ingredients/import
pub async fn import_ingredients(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<IngredientImportSummary>> {
    let sheet = read_upload(&mut multipart).await?;

    let mut ingredients = Vec::new();
    let mut errors = Vec::new();
    for row in prepare_import::<IngredientSchema>(&sheet) {
        let draft = match row.outcome {
            Ok(draft) => draft,
            Err(reason) => {
                errors.push(row_error(row.row_number, reason));
                continue;
            }
        };
        match state.catalog.create_ingredient(&draft).await {
            Ok(ingredient) => ingredients.push(ingredient),
            Err(e) => {
                tracing::warn!(row = row.row_number, error = %e, "Ingredient import row failed");
                errors.push(row_error(row.row_number, e));
            }
        }
    }

    tracing::info!(
        imported = ingredients.len(),
        failed = errors.len(),
        "Ingredients imported"
    );
    Ok(Json(IngredientImportSummary {
        success: true,
        imported: ingredients.len(),
        errors,
        ingredients,
    }))
}

/// Read the `file` part and parse its first worksheet.
async fn read_upload(multipart: &mut Multipart) -> AppResult<Sheet> {
    let file = read_file_field(multipart, FILE_FIELD).await?;
    tracing::debug!(
        file_name = file.file_name.as_deref().unwrap_or("<unnamed>"),
        size = file.bytes.len(),
        "Reading workbook"
    );

    let sheet = tokio::task::spawn_blocking(move || read_first_sheet(&file.bytes))
        .await
        .map_err(|e| AppError::InternalError(format!("Import task failed: {e}")))??;
    Ok(sheet)
}
