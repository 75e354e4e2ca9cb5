//! Repository for the `products` table.

use sqlx::PgPool;
use vinventory_core::product::{NewProduct, ProductPatch};
use vinventory_core::types::DbId;

use super::write::{insert_query, update_query};
use crate::models::product::Product;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, brand, volume, vintage, wine_type, sugar_content, appellation, \
    alcohol_content, country_of_origin, sku, ean, packaging_gases, portion_size, \
    energy_kcal, energy_kj, fat, saturated_fat, carbohydrates, sugars, protein, salt, \
    organic, vegetarian, vegan, operator_type, operator_name, operator_address, \
    operator_info, external_link, redirect_link, image_url, created_by, \
    created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a normalized product, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewProduct) -> Result<Product, sqlx::Error> {
        let mut qb = insert_query("products", input.values(), COLUMNS);
        qb.build_query_as::<Product>().fetch_one(pool).await
    }

    /// Find a product by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all products, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Columns absent from `patch` keep their value.
    ///
    /// An empty patch returns the current row unchanged. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, sqlx::Error> {
        if patch.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        let mut qb = update_query("products", id, patch.values(), COLUMNS);
        qb.build_query_as::<Product>().fetch_optional(pool).await
    }

    /// Set or clear the product image URL.
    pub async fn set_image_url(
        pool: &PgPool,
        id: DbId,
        image_url: Option<&str>,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET image_url = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
