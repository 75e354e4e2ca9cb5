pub mod health;
pub mod ingredients;
pub mod options;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /options                          enumerated form options
///
/// /products                         list, create
/// /products/export                  xlsx export (GET)
/// /products/import                  xlsx import (POST, multipart `file`)
/// /products/{id}                    get, partial update, delete
/// /products/{id}/image              upload (POST, multipart `image`), remove
///
/// /ingredients                      list, create
/// /ingredients/export               xlsx export (GET)
/// /ingredients/import               xlsx import (POST, multipart `file`)
/// /ingredients/{id}                 get, partial update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(options::router())
        .nest("/products", products::router())
        .nest("/ingredients", ingredients::router())
}
