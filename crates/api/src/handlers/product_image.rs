//! Handlers for `/products/{id}/image`.
//!
//! An upload is vetted, staged as a temporary file under
//! `ServerConfig::upload_tmp_dir`, sent to object storage, and the staged
//! file is removed whatever the outcome. The product row then points at the
//! new public URL and the previous blob is removed best-effort.

use std::path::{Path as FsPath, PathBuf};

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use vinventory_core::error::CoreError;
use vinventory_core::image::{inspect_image, product_image_key, ImageKind};
use vinventory_core::product::ProductSchema;
use vinventory_core::schema::Schema;
use vinventory_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::handlers::read_file_field;
use crate::state::AppState;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

/// Response body for both upload and removal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub success: bool,
    pub image_url: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ProductSchema::ENTITY,
        id,
    })
}

/// POST /api/products/{id}/image
pub async fn upload(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<ImageResponse>> {
    let product = state
        .catalog
        .find_product(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let file = read_file_field(&mut multipart, IMAGE_FIELD).await?;
    let kind = inspect_image(file.content_type.as_deref(), &file.bytes)?;

    let staged = stage(&state.config.upload_tmp_dir, &kind, &file.bytes).await?;
    let uploaded = transfer_staged(&state, id, &kind, &staged).await;
    if let Err(e) = tokio::fs::remove_file(&staged).await {
        tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged upload");
    }
    let image_url = uploaded?;

    // The new blob is orphaned unless the row points at it.
    let recorded = match state.catalog.set_product_image(id, Some(&image_url)).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(id)),
        Err(e) => Err(AppError::from(e)),
    };
    if let Err(e) = recorded {
        remove_blob_best_effort(&state, id, &image_url).await;
        return Err(e);
    }
    tracing::info!(product_id = id, image_url = %image_url, "Product image uploaded");

    if let Some(previous) = product.image_url.filter(|url| *url != image_url) {
        remove_blob_best_effort(&state, id, &previous).await;
    }

    Ok(Json(ImageResponse {
        success: true,
        image_url: Some(image_url),
    }))
}

/// DELETE /api/products/{id}/image
///
/// Removes the stored blob (if the URL points into the bucket) and clears
/// `image_url`.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ImageResponse>> {
    let product = state
        .catalog
        .find_product(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(key) = product
        .image_url
        .as_deref()
        .and_then(|url| state.storage.key_from_url(url))
    {
        state.storage.delete(&key).await?;
    }

    state
        .catalog
        .set_product_image(id, None)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(product_id = id, "Product image removed");

    Ok(Json(ImageResponse {
        success: true,
        image_url: None,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write the payload to a uniquely named file in `dir`.
async fn stage(dir: &FsPath, kind: &ImageKind, bytes: &[u8]) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let path = dir.join(format!("{}.{}", uuid::Uuid::new_v4(), kind.extension));
    write_staged(&path, bytes).await?;
    Ok(path)
}

/// Write `bytes` to `path`, removing whatever was partially written on
/// failure.
async fn write_staged(path: &FsPath, bytes: &[u8]) -> AppResult<()> {
    if let Err(e) = tokio::fs::write(path, bytes).await {
        if let Err(cleanup) = tokio::fs::remove_file(path).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %path.display(),
                    error = %cleanup,
                    "Failed to remove partial upload"
                );
            }
        }
        return Err(AppError::InternalError(e.to_string()));
    }
    Ok(())
}

/// Read the staged file back and upload it, returning the public URL.
async fn transfer_staged(
    state: &AppState,
    product_id: DbId,
    kind: &ImageKind,
    staged: &FsPath,
) -> AppResult<String> {
    let bytes = tokio::fs::read(staged)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let key = product_image_key(
        product_id,
        chrono::Utc::now().timestamp_millis(),
        kind.extension,
    );
    let url = state.storage.upload(&key, bytes, kind.content_type).await?;
    Ok(url)
}

async fn remove_blob_best_effort(state: &AppState, product_id: DbId, url: &str) {
    let Some(key) = state.storage.key_from_url(url) else {
        return;
    };
    if let Err(e) = state.storage.delete(&key).await {
        tracing::warn!(product_id, key, error = %e, "Failed to remove product image blob");
    }
}
