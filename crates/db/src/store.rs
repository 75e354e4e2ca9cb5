//! The persistence gateway seen by the HTTP layer.
//!
//! Handlers never hold a pool directly. They receive an `Arc<dyn
//! CatalogStore>` built once at startup, which keeps the route layer
//! independent of the concrete database and lets tests substitute an
//! in-memory store.

use async_trait::async_trait;
use vinventory_core::ingredient::{IngredientPatch, NewIngredient};
use vinventory_core::product::{NewProduct, ProductPatch};
use vinventory_core::types::DbId;

use crate::models::ingredient::Ingredient;
use crate::models::product::Product;
use crate::repositories::{IngredientRepo, ProductRepo};
use crate::DbPool;

/// Every persistence operation the application performs. Each method is a
/// single round trip; nothing is cached between calls.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    async fn list_products(&self) -> Result<Vec<Product>, sqlx::Error>;
    async fn find_product(&self, id: DbId) -> Result<Option<Product>, sqlx::Error>;
    async fn create_product(&self, input: &NewProduct) -> Result<Product, sqlx::Error>;
    /// Merge `patch` onto the stored row. `None` when the row is absent.
    async fn update_product(
        &self,
        id: DbId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, sqlx::Error>;
    async fn set_product_image(
        &self,
        id: DbId,
        image_url: Option<&str>,
    ) -> Result<Option<Product>, sqlx::Error>;
    /// `true` when a row was removed.
    async fn delete_product(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, sqlx::Error>;
    async fn find_ingredient(&self, id: DbId) -> Result<Option<Ingredient>, sqlx::Error>;
    async fn create_ingredient(&self, input: &NewIngredient) -> Result<Ingredient, sqlx::Error>;
    async fn update_ingredient(
        &self,
        id: DbId,
        patch: &IngredientPatch,
    ) -> Result<Option<Ingredient>, sqlx::Error>;
    async fn delete_ingredient(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// PostgreSQL-backed [`CatalogStore`].
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Close the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, sqlx::Error> {
        ProductRepo::list(&self.pool).await
    }

    async fn find_product(&self, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        ProductRepo::find_by_id(&self.pool, id).await
    }

    async fn create_product(&self, input: &NewProduct) -> Result<Product, sqlx::Error> {
        ProductRepo::create(&self.pool, input).await
    }

    async fn update_product(
        &self,
        id: DbId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, sqlx::Error> {
        ProductRepo::update(&self.pool, id, patch).await
    }

    async fn set_product_image(
        &self,
        id: DbId,
        image_url: Option<&str>,
    ) -> Result<Option<Product>, sqlx::Error> {
        ProductRepo::set_image_url(&self.pool, id, image_url).await
    }

    async fn delete_product(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ProductRepo::delete(&self.pool, id).await
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, sqlx::Error> {
        IngredientRepo::list(&self.pool).await
    }

    async fn find_ingredient(&self, id: DbId) -> Result<Option<Ingredient>, sqlx::Error> {
        IngredientRepo::find_by_id(&self.pool, id).await
    }

    async fn create_ingredient(&self, input: &NewIngredient) -> Result<Ingredient, sqlx::Error> {
        IngredientRepo::create(&self.pool, input).await
    }

    async fn update_ingredient(
        &self,
        id: DbId,
        patch: &IngredientPatch,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        IngredientRepo::update(&self.pool, id, patch).await
    }

    async fn delete_ingredient(&self, id: DbId) -> Result<bool, sqlx::Error> {
        IngredientRepo::delete(&self.pool, id).await
    }
}
