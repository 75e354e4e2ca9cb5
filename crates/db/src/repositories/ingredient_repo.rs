//! Repository for the `ingredients` table.

use sqlx::PgPool;
use vinventory_core::ingredient::{IngredientPatch, NewIngredient};
use vinventory_core::types::DbId;

use super::write::{insert_query, update_query};
use crate::models::ingredient::Ingredient;

const COLUMNS: &str =
    "id, name, category, e_number, details, allergens, created_by, created_at, updated_at";

/// Provides CRUD operations for ingredients.
pub struct IngredientRepo;

impl IngredientRepo {
    /// Insert a normalized ingredient, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewIngredient) -> Result<Ingredient, sqlx::Error> {
        let mut qb = insert_query("ingredients", input.values(), COLUMNS);
        qb.build_query_as::<Ingredient>().fetch_one(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients WHERE id = $1");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all ingredients alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients ORDER BY name, id");
        sqlx::query_as::<_, Ingredient>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &IngredientPatch,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        if patch.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        let mut qb = update_query("ingredients", id, patch.values(), COLUMNS);
        qb.build_query_as::<Ingredient>().fetch_optional(pool).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
