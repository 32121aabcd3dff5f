//! The storage seam used by the HTTP layer.
//!
//! Handlers talk to a [`Store`] rather than to the repositories directly so
//! the same request paths run against PostgreSQL ([`PgStore`]) in production
//! and against [`MemoryStore`](crate::memory::MemoryStore) in tests.

use async_trait::async_trait;
use storefront_core::order::{NewOrder, OrderScope};
use storefront_core::types::DbId;

use crate::models::order::{populate, referenced_product_ids, Order, OrderDetail};
use crate::models::product::{CreateProduct, Product};
use crate::models::user::{CreateUser, User};
use crate::repositories::{OrderRepo, ProductRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness rule rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The backend could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend_tag(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Persist a validated order. Exactly one order is written or none.
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError>;

    /// Listable orders in `scope`, newest first, with products resolved.
    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<OrderDetail>, StoreError>;

    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_product(&self, id: DbId) -> Result<Option<Product>, StoreError>;

    async fn create_product(&self, input: &CreateProduct) -> Result<Product, StoreError>;

    /// Fails with [`StoreError::Conflict`] if the email is taken.
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// [`Store`] backed by the PostgreSQL repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, StoreError> {
        Ok(OrderRepo::create(&self.pool, order).await?)
    }

    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<OrderDetail>, StoreError> {
        let orders = OrderRepo::list(&self.pool, scope).await?;
        let order_ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
        let items = OrderRepo::items_for_orders(&self.pool, &order_ids).await?;
        let products =
            ProductRepo::find_by_ids(&self.pool, &referenced_product_ids(&items)).await?;
        Ok(populate(orders, items, products))
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(ProductRepo::list(&self.pool).await?)
    }

    async fn find_product(&self, id: DbId) -> Result<Option<Product>, StoreError> {
        Ok(ProductRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_product(&self, input: &CreateProduct) -> Result<Product, StoreError> {
        Ok(ProductRepo::create(&self.pool, input).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(|err| conflict_on_unique(err, "Email is already registered"))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }
}

/// Turn a unique violation into [`StoreError::Conflict`]; pass anything else through.
fn conflict_on_unique(err: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
            return StoreError::Conflict(message.to_string());
        }
    }
    StoreError::Database(err)
}
