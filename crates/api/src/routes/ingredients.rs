//! Route definitions for the `/ingredients` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{ingredient, transfer};
use crate::state::AppState;

/// Routes mounted at `/ingredients`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /export          -> export_ingredients
/// POST   /import          -> import_ingredients
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ingredient::list).post(ingredient::create))
        .route("/export", get(transfer::export_ingredients))
        .route("/import", post(transfer::import_ingredients))
        .route(
            "/{id}",
            get(ingredient::get_by_id)
                .put(ingredient::update)
                .delete(ingredient::delete),
        )
}
