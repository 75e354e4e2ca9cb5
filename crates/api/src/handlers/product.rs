//! Handlers for the `/products` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vinventory_core::error::CoreError;
use vinventory_core::product::{normalize_new_product, normalize_product_patch, ProductSchema};
use vinventory_core::schema::Schema;
use vinventory_core::types::DbId;
use vinventory_db::models::product::Product;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/products
///
/// List all products, most recently created first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = state.catalog.list_products().await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = state
        .catalog
        .find_product(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ProductSchema::ENTITY,
            id,
        }))?;
    Ok(Json(product))
}

/// POST /api/products
///
/// Normalize the body and insert it. Returns 400 with every failing field.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let input = normalize_new_product(&body).map_err(CoreError::from)?;
    let product = state.catalog.create_product(&input).await?;

    tracing::info!(product_id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
///
/// Partial update: only the supplied fields change. The body is validated
/// before the row is looked up.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<Product>> {
    let patch = normalize_product_patch(&body).map_err(CoreError::from)?;
    let product = state
        .catalog
        .update_product(id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ProductSchema::ENTITY,
            id,
        }))?;

    tracing::info!(product_id = id, fields = patch.values().len(), "Product updated");
    Ok(Json(product))
}

/// DELETE /api/products/{id}
///
/// Deletes the row, then removes its image blob on a best-effort basis.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let product = state
        .catalog
        .find_product(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ProductSchema::ENTITY,
            id,
        }))?;

    if !state.catalog.delete_product(id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: ProductSchema::ENTITY,
            id,
        }));
    }
    tracing::info!(product_id = id, "Product deleted");

    if let Some(key) = product
        .image_url
        .as_deref()
        .and_then(|url| state.storage.key_from_url(url))
    {
        if let Err(e) = state.storage.delete(&key).await {
            tracing::warn!(product_id = id, key, error = %e, "Failed to remove product image");
        }
    }

    Ok(StatusCode::NO_CONTENT)
}
