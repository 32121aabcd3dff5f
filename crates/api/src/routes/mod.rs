pub mod health;
pub mod order;
pub mod product;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/register                                   register (public)
/// /user/login                                      login (public)
/// /seller/login                                    seller login (public)
///
/// /product/list                                    list products (public)
/// /product/{id}                                    get product (public)
/// /product/add                                     create product (seller)
///
/// /order/cod                                       place COD order (buyer)
/// /order/user                                      buyer's orders (buyer)
/// /order/seller                                    all orders (seller)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user::router())
        .nest("/seller", user::seller_router())
        .nest("/product", product::router())
        .nest("/order", order::router())
}
