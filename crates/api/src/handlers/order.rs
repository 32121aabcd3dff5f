//! Handlers for the `/order` resource.
//!
//! Placement is cash-on-delivery only. Both listings share [`list_scoped`];
//! they differ only in the [`OrderScope`] their extractor grants.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use storefront_core::order::{validate_place_order, OrderScope, PlaceOrderRequest};
use storefront_core::types::DbId;
use storefront_db::models::order::OrderDetail;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::{RequireBuyer, RequireSeller};
use crate::response::Success;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub message: &'static str,
    pub order_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub orders: Vec<OrderDetail>,
}

/// POST /api/order/cod
pub async fn place_cod(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
    AppJson(input): AppJson<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<Success<OrderPlaced>>)> {
    let new_order = validate_place_order(user.user_id, &input).inspect_err(|e| {
        tracing::info!(user_id = user.user_id, error = %e, "Rejected order submission");
    })?;

    let order = state.store.insert_order(&new_order).await?;
    tracing::info!(
        order_id = order.id,
        user_id = user.user_id,
        items = new_order.items.len(),
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(Success::new(OrderPlaced {
            message: "Order placed successfully",
            order_id: order.id,
        })),
    ))
}

/// GET /api/order/user
pub async fn list_for_buyer(
    State(state): State<AppState>,
    RequireBuyer(user): RequireBuyer,
) -> AppResult<Json<Success<OrderList>>> {
    list_scoped(&state, OrderScope::Buyer(user.user_id)).await
}

/// GET /api/order/seller
pub async fn list_all(
    State(state): State<AppState>,
    RequireSeller(_seller): RequireSeller,
) -> AppResult<Json<Success<OrderList>>> {
    list_scoped(&state, OrderScope::All).await
}

async fn list_scoped(state: &AppState, scope: OrderScope) -> AppResult<Json<Success<OrderList>>> {
    let orders = state.store.list_orders(scope).await?;
    tracing::debug!(?scope, count = orders.len(), "Listed orders");
    Ok(Json(Success::new(OrderList { orders })))
}
