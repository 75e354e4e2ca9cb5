#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tower::ServiceExt;

use vinventory_api::config::ServerConfig;
use vinventory_api::router::build_app_router;
use vinventory_api::state::AppState;
use vinventory_core::ingredient::{IngredientPatch, NewIngredient};
use vinventory_core::product::{NewProduct, ProductPatch};
use vinventory_core::types::DbId;
use vinventory_db::models::ingredient::Ingredient;
use vinventory_db::models::product::Product;
use vinventory_db::store::CatalogStore;
use vinventory_storage::{ObjectStore, StorageError};

pub const STORAGE_BASE: &str = "http://storage.test/public/product-images/";

// ---------------------------------------------------------------------------
// In-memory catalog
// ---------------------------------------------------------------------------

/// A [`CatalogStore`] over two ordered maps. Rows are built from the
/// normalized values the same way the database would store them.
#[derive(Default)]
pub struct MemoryCatalog {
    next_id: AtomicI64,
    products: Mutex<BTreeMap<DbId, Product>>,
    ingredients: Mutex<BTreeMap<DbId, Ingredient>>,
    /// Inserts of a record with this name fail with an upstream error.
    pub reject_name: Mutex<Option<String>>,
    pub offline: AtomicBool,
    /// `set_product_image` fails with an upstream error.
    pub fail_image_updates: AtomicBool,
}

impl MemoryCatalog {
    fn next_id(&self) -> DbId {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn check_online(&self) -> Result<(), sqlx::Error> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn check_name(&self, values: &Map<String, Value>) -> Result<(), sqlx::Error> {
        let rejected = self.reject_name.lock().unwrap().clone();
        if rejected.is_some() && values.get("name").and_then(Value::as_str) == rejected.as_deref()
        {
            return Err(sqlx::Error::Protocol("insert rejected by test store".into()));
        }
        Ok(())
    }

    pub fn product_count(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.lock().unwrap().len()
    }

    pub fn product(&self, id: DbId) -> Option<Product> {
        self.products.lock().unwrap().get(&id).cloned()
    }
}

/// Build a row from normalized values plus server-assigned columns.
fn new_row<T: DeserializeOwned>(id: DbId, mut values: Map<String, Value>) -> T {
    let now = serde_json::to_value(chrono::Utc::now()).unwrap();
    values.insert("id".into(), Value::from(id));
    values.insert("created_at".into(), now.clone());
    values.insert("updated_at".into(), now);
    serde_json::from_value(Value::Object(values)).unwrap()
}

/// Merge patched values onto an existing row.
fn merged_row<T: serde::Serialize + DeserializeOwned>(row: &T, patch: Map<String, Value>) -> T {
    let Value::Object(mut current) = serde_json::to_value(row).unwrap() else {
        unreachable!("rows serialize to objects");
    };
    current.extend(patch);
    current.insert(
        "updated_at".into(),
        serde_json::to_value(chrono::Utc::now()).unwrap(),
    );
    serde_json::from_value(Value::Object(current)).unwrap()
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check_online()
    }

    async fn list_products(&self) -> Result<Vec<Product>, sqlx::Error> {
        self.check_online()?;
        Ok(self.products.lock().unwrap().values().rev().cloned().collect())
    }

    async fn find_product(&self, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        self.check_online()?;
        Ok(self.product(id))
    }

    async fn create_product(&self, input: &NewProduct) -> Result<Product, sqlx::Error> {
        self.check_online()?;
        let values = input.to_json();
        self.check_name(&values)?;
        let product: Product = new_row(self.next_id(), values);
        self.products
            .lock()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: DbId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, sqlx::Error> {
        self.check_online()?;
        let mut products = self.products.lock().unwrap();
        let Some(current) = products.get(&id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(current.clone()));
        }
        let updated = merged_row(current, patch.to_json());
        products.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn set_product_image(
        &self,
        id: DbId,
        image_url: Option<&str>,
    ) -> Result<Option<Product>, sqlx::Error> {
        self.check_online()?;
        if self.fail_image_updates.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("image update rejected by test store".into()));
        }
        let mut products = self.products.lock().unwrap();
        Ok(products.get_mut(&id).map(|p| {
            p.image_url = image_url.map(str::to_string);
            p.clone()
        }))
    }

    async fn delete_product(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.check_online()?;
        Ok(self.products.lock().unwrap().remove(&id).is_some())
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, sqlx::Error> {
        self.check_online()?;
        let mut all: Vec<Ingredient> = self.ingredients.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_ingredient(&self, id: DbId) -> Result<Option<Ingredient>, sqlx::Error> {
        self.check_online()?;
        Ok(self.ingredients.lock().unwrap().get(&id).cloned())
    }

    async fn create_ingredient(&self, input: &NewIngredient) -> Result<Ingredient, sqlx::Error> {
        self.check_online()?;
        let values = input.to_json();
        self.check_name(&values)?;
        let ingredient: Ingredient = new_row(self.next_id(), values);
        self.ingredients
            .lock()
            .unwrap()
            .insert(ingredient.id, ingredient.clone());
        Ok(ingredient)
    }

    async fn update_ingredient(
        &self,
        id: DbId,
        patch: &IngredientPatch,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        self.check_online()?;
        let mut ingredients = self.ingredients.lock().unwrap();
        let Some(current) = ingredients.get(&id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(current.clone()));
        }
        let updated = merged_row(current, patch.to_json());
        ingredients.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_ingredient(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.check_online()?;
        Ok(self.ingredients.lock().unwrap().remove(&id).is_some())
    }
}

// ---------------------------------------------------------------------------
// In-memory object store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<BTreeMap<String, (String, Vec<u8>)>>,
    pub fail_uploads: AtomicBool,
}

impl MemoryStorage {
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(content_type, _)| content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryStorage {
    fn bucket(&self) -> &str {
        "product-images"
    }

    fn public_url(&self, key: &str) -> String {
        format!("{STORAGE_BASE}{key}")
    }

    async fn ensure_bucket(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Api {
                status: 503,
                body: "storage unavailable".into(),
            });
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (content_type.to_string(), bytes));
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Everything a test needs: the gateways (to seed and inspect) and the
/// scratch upload directory (kept alive for the test's duration).
pub struct TestContext {
    pub catalog: Arc<MemoryCatalog>,
    pub storage: Arc<MemoryStorage>,
    pub upload_dir: tempfile::TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(MemoryCatalog::default()),
            storage: Arc::new(MemoryStorage::default()),
            upload_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Build a fresh router over the shared gateways.
    pub fn app(&self) -> Router {
        build_test_app(
            self.catalog.clone(),
            self.storage.clone(),
            test_config(self.upload_dir.path().to_path_buf()),
        )
    }

    /// Number of files left in the upload staging directory.
    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path()).unwrap().count()
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(upload_tmp_dir: std::path::PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 1,
        upload_tmp_dir,
        max_body_bytes: 10 * 1024 * 1024,
    }
}

/// Build the full application router over the given gateways.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(
    catalog: Arc<dyn CatalogStore>,
    storage: Arc<dyn ObjectStore>,
    config: ServerConfig,
) -> Router {
    build_app_router(AppState {
        catalog,
        storage,
        config: Arc::new(config),
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "vinventory-test-boundary";

/// One file part of a multipart form.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

pub fn multipart_body(parts: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                part.field, part.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(part.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[FilePart<'_>]) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Build an xlsx workbook for import tests.
pub fn workbook(headers: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();
    vinventory_core::spreadsheet::write_sheet("Sheet1", headers, &rows).unwrap()
}

/// Smallest byte sequences that `image::guess_format` recognizes.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];
