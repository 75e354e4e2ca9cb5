//! Handlers for the `/ingredients` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vinventory_core::error::CoreError;
use vinventory_core::ingredient::{
    normalize_ingredient_patch, normalize_new_ingredient, IngredientSchema,
};
use vinventory_core::schema::Schema;
use vinventory_core::types::DbId;
use vinventory_db::models::ingredient::Ingredient;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: IngredientSchema::ENTITY,
        id,
    })
}

/// GET /api/ingredients
///
/// List all ingredients alphabetically.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = state.catalog.list_ingredients().await?;
    Ok(Json(ingredients))
}

/// GET /api/ingredients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = state
        .catalog
        .find_ingredient(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ingredient))
}

/// POST /api/ingredients
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let input = normalize_new_ingredient(&body).map_err(CoreError::from)?;
    let ingredient = state.catalog.create_ingredient(&input).await?;

    tracing::info!(ingredient_id = ingredient.id, name = %ingredient.name, "Ingredient created");
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// PUT /api/ingredients/{id}
///
/// Partial update. Unlike products, an unknown id is reported before the
/// body is validated.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<Ingredient>> {
    state
        .catalog
        .find_ingredient(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let patch = normalize_ingredient_patch(&body).map_err(CoreError::from)?;
    let ingredient = state
        .catalog
        .update_ingredient(id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(ingredient_id = id, fields = patch.values().len(), "Ingredient updated");
    Ok(Json(ingredient))
}

/// DELETE /api/ingredients/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.catalog.delete_ingredient(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(ingredient_id = id, "Ingredient deleted");
    Ok(StatusCode::NO_CONTENT)
}
