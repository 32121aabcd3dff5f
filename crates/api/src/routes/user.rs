//! Route definitions for buyer and seller sessions.

use axum::routing::post;
use axum::Router;

use crate::handlers::{seller, user};
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST   /register   -> register
/// POST   /login      -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
}

/// Routes mounted at `/seller`.
///
/// ```text
/// POST   /login      -> login
/// ```
pub fn seller_router() -> Router<AppState> {
    Router::new().route("/login", post(seller::login))
}
