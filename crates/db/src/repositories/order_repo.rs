//! Repository for the `orders` and `order_items` tables.

use sqlx::PgPool;
use storefront_core::order::{NewOrder, OrderScope};
use storefront_core::types::DbId;

use crate::models::order::{Order, OrderItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, company_name, company_description, contact_number, \
     time_line, payment_type, is_paid, status, created_at, updated_at";

/// Provides insert and listing operations for orders.
///
/// Orders are never updated or deleted through this repository.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order and its items in one transaction, returning the order row.
    pub async fn create(pool: &PgPool, input: &NewOrder) -> Result<Order, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO orders
                (user_id, company_name, company_description, contact_number,
                 time_line, payment_type, is_paid, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(&input.company_name)
            .bind(&input.company_description)
            .bind(input.contact_number)
            .bind(input.time_line)
            .bind(input.payment_type.as_str())
            .bind(input.is_paid)
            .bind(&input.status)
            .fetch_one(&mut *tx)
            .await?;

        let (product_ids, quantities): (Vec<DbId>, Vec<i32>) = input
            .items
            .iter()
            .map(|i| (i.product_id, i.quantity))
            .unzip();
        let positions: Vec<i32> = (0..).take(input.items.len()).collect();

        sqlx::query(
            "INSERT INTO order_items (order_id, position, product_id, quantity)
             SELECT $1, t.position, t.product_id, t.quantity
             FROM UNNEST($2::INTEGER[], $3::BIGINT[], $4::INTEGER[])
                  AS t(position, product_id, quantity)",
        )
        .bind(order.id)
        .bind(&positions)
        .bind(&product_ids)
        .bind(&quantities)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(order_id = order.id, items = positions.len(), "Order committed");
        Ok(order)
    }

    /// List listable orders (cash-on-delivery or paid) within `scope`,
    /// newest first. Ties on `created_at` fall back to `id`.
    pub async fn list(pool: &PgPool, scope: OrderScope) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND (payment_type = 'COD' OR is_paid)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(scope.buyer())
            .fetch_all(pool)
            .await
    }

    /// Fetch the items of every order in `order_ids`.
    pub async fn items_for_orders(
        pool: &PgPool,
        order_ids: &[DbId],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, OrderItem>(
            "SELECT order_id, position, product_id, quantity
             FROM order_items
             WHERE order_id = ANY($1)
             ORDER BY order_id, position",
        )
        .bind(order_ids)
        .fetch_all(pool)
        .await
    }
}
