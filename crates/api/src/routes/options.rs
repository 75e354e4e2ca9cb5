use axum::{routing::get, Json, Router};
use vinventory_core::options::CatalogOptions;

use crate::state::AppState;

/// GET /api/options -- option lists for the product and ingredient forms.
async fn list_options() -> Json<CatalogOptions> {
    Json(CatalogOptions::default())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/options", get(list_options))
}
