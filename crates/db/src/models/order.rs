//! Order entity model and the populated read shape.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

use crate::models::product::Product;

/// A row from the `orders` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub company_name: String,
    pub company_description: String,
    pub contact_number: i64,
    pub time_line: Timestamp,
    /// `"COD"` or `"Online"`.
    pub payment_type: String,
    pub is_paid: bool,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `order_items` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OrderItem {
    pub order_id: DbId,
    pub position: i32,
    pub product_id: DbId,
    pub quantity: i32,
}

/// One order item with its product reference resolved.
///
/// `product` is `None` when the referenced product no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemDetail {
    pub product: Option<Product>,
    pub quantity: i32,
}

/// An order as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub items: Vec<OrderItemDetail>,
    pub company_name: String,
    pub company_description: String,
    pub contact_number: i64,
    pub time_line: Timestamp,
    pub payment_type: String,
    pub is_paid: bool,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product ids referenced by `items`, deduplicated.
pub fn referenced_product_ids(items: &[OrderItem]) -> Vec<DbId> {
    let mut ids: Vec<DbId> = items.iter().map(|i| i.product_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Attach items and resolved products to each order.
///
/// Order of `orders` is preserved; items within an order follow `position`.
pub fn populate(
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    products: Vec<Product>,
) -> Vec<OrderDetail> {
    let products: HashMap<DbId, Product> = products.into_iter().map(|p| (p.id, p)).collect();

    let mut items_by_order: HashMap<DbId, Vec<OrderItem>> = HashMap::new();
    for item in items {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let mut rows = items_by_order.remove(&order.id).unwrap_or_default();
            rows.sort_by_key(|i| i.position);
            let items = rows
                .into_iter()
                .map(|i| OrderItemDetail {
                    product: products.get(&i.product_id).cloned(),
                    quantity: i.quantity,
                })
                .collect();

            OrderDetail {
                id: order.id,
                user_id: order.user_id,
                items,
                company_name: order.company_name,
                company_description: order.company_description,
                contact_number: order.contact_number,
                time_line: order.time_line,
                payment_type: order.payment_type,
                is_paid: order.is_paid,
                status: order.status,
                created_at: order.created_at,
                updated_at: order.updated_at,
            }
        })
        .collect()
}
