use std::sync::Arc;

use vinventory_db::store::CatalogStore;
use vinventory_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every member is behind an `Arc`. The gateways are
/// constructed once in `main` and injected here.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway.
    pub catalog: Arc<dyn CatalogStore>,
    /// Object storage for product images.
    pub storage: Arc<dyn ObjectStore>,
    pub config: Arc<ServerConfig>,
}
