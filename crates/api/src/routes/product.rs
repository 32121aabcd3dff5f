//! Route definitions for the `/product` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/product`.
///
/// ```text
/// GET    /list       -> list
/// POST   /add        -> create     (seller/admin)
/// GET    /{id}       -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(product::list))
        .route("/add", post(product::create))
        .route("/{id}", get(product::get_by_id))
}
