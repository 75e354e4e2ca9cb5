//! Route definitions for the `/products` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{product, product_image, transfer};
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /export          -> export_products
/// POST   /import          -> import_products
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/image      -> product_image::upload
/// DELETE /{id}/image      -> product_image::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route("/export", get(transfer::export_products))
        .route("/import", post(transfer::import_products))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route(
            "/{id}/image",
            post(product_image::upload).delete(product_image::delete),
        )
}
