use std::sync::Arc;

use storefront_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Order, product and user persistence.
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
}
