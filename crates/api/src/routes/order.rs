//! Route definitions for the `/order` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::order;
use crate::state::AppState;

/// Routes mounted at `/order`.
///
/// ```text
/// POST   /cod        -> place_cod       (buyer)
/// GET    /user       -> list_for_buyer  (buyer)
/// GET    /seller     -> list_all        (seller/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cod", post(order::place_cod))
        .route("/user", get(order::list_for_buyer))
        .route("/seller", get(order::list_all))
}
