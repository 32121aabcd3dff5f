//! In-process [`Store`] used by integration tests and local experiments.
//!
//! Applies the same listing rules as the SQL queries: the payment predicate,
//! the buyer filter, and newest-first ordering with `id` as tie-breaker.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use storefront_core::order::{is_listable, NewOrder, OrderScope, PaymentType};
use storefront_core::types::{DbId, Timestamp};
use tokio::sync::Mutex;

use crate::models::order::{populate, Order, OrderDetail, OrderItem};
use crate::models::product::{CreateProduct, Product};
use crate::models::user::{CreateUser, User};
use crate::store::{Store, StoreError};

#[derive(Default)]
struct Tables {
    orders: BTreeMap<DbId, Order>,
    order_items: Vec<OrderItem>,
    products: BTreeMap<DbId, Product>,
    users: BTreeMap<DbId, User>,
    next_id: DbId,
    last_timestamp: Option<Timestamp>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    /// Wall-clock time, nudged forward so successive rows never share a timestamp.
    fn now(&mut self) -> Timestamp {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + chrono::Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail with [`StoreError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of orders written so far, listable or not.
    pub async fn order_count(&self) -> usize {
        self.tables.lock().await.orders.len()
    }

    /// Insert an order row as-is, bypassing submission rules. Lets tests
    /// seed states the service itself never writes, such as unpaid online orders.
    pub async fn seed_order(
        &self,
        user_id: DbId,
        payment_type: PaymentType,
        is_paid: bool,
        items: &[(DbId, i32)],
    ) -> Order {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let now = tables.now();
        let order = Order {
            id,
            user_id,
            company_name: "Seeded".into(),
            company_description: "Seeded order".into(),
            contact_number: 1,
            time_line: now,
            payment_type: payment_type.as_str().to_string(),
            is_paid,
            status: storefront_core::order::DEFAULT_ORDER_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        };
        for (position, (product_id, quantity)) in (0..).zip(items) {
            tables.order_items.push(OrderItem {
                order_id: id,
                position,
                product_id: *product_id,
                quantity: *quantity,
            });
        }
        tables.orders.insert(id, order.clone());
        order
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }

    async fn insert_order(&self, input: &NewOrder) -> Result<Order, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let now = tables.now();

        let order = Order {
            id,
            user_id: input.user_id,
            company_name: input.company_name.clone(),
            company_description: input.company_description.clone(),
            contact_number: input.contact_number,
            time_line: input.time_line,
            payment_type: input.payment_type.as_str().to_string(),
            is_paid: input.is_paid,
            status: input.status.clone(),
            created_at: now,
            updated_at: now,
        };
        for (position, item) in (0..).zip(&input.items) {
            tables.order_items.push(OrderItem {
                order_id: id,
                position,
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
        tables.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<OrderDetail>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;

        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| scope.permits(o.user_id))
            .filter(|o| {
                PaymentType::parse(&o.payment_type)
                    .is_some_and(|payment| is_listable(payment, o.is_paid))
            })
            .cloned()
            .collect();
        orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let items: Vec<OrderItem> = tables
            .order_items
            .iter()
            .filter(|i| orders.iter().any(|o| o.id == i.order_id))
            .cloned()
            .collect();
        let products: Vec<Product> = tables.products.values().cloned().collect();

        Ok(populate(orders, items, products))
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let mut products: Vec<Product> = tables.products.values().cloned().collect();
        products.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(products)
    }

    async fn find_product(&self, id: DbId) -> Result<Option<Product>, StoreError> {
        self.check_available()?;
        Ok(self.tables.lock().await.products.get(&id).cloned())
    }

    async fn create_product(&self, input: &CreateProduct) -> Result<Product, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        let now = tables.now();
        let product = Product {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            offer_price: input.offer_price,
            image: input.image.clone(),
            category: input.category.clone(),
            in_stock: input.in_stock.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.email == input.email) {
            return Err(StoreError::Conflict("Email is already registered".into()));
        }
        let id = tables.next_id();
        let now = tables.now();
        let user = User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use storefront_core::order::{NewOrderItem, DEFAULT_ORDER_STATUS};

    fn new_order(user_id: DbId, product_id: DbId) -> NewOrder {
        NewOrder {
            user_id,
            items: vec![NewOrderItem {
                product_id,
                quantity: 2,
            }],
            company_name: "Acme".into(),
            company_description: "desc".into(),
            contact_number: 555,
            time_line: Utc::now(),
            payment_type: PaymentType::Cod,
            is_paid: false,
            status: DEFAULT_ORDER_STATUS.into(),
        }
    }

    fn new_product(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.into(),
            description: vec![],
            price: 12.5,
            offer_price: Some(10.0),
            image: vec![],
            category: "tea".into(),
            in_stock: None,
        }
    }

    #[tokio::test]
    async fn buyer_scope_filters_and_sorts_newest_first() {
        let store = MemoryStore::new();
        let product = store.create_product(&new_product("Green")).await.unwrap();

        let first = store.insert_order(&new_order(1, product.id)).await.unwrap();
        store.insert_order(&new_order(2, product.id)).await.unwrap();
        let third = store.insert_order(&new_order(1, product.id)).await.unwrap();

        let mine = store.list_orders(OrderScope::Buyer(1)).await.unwrap();
        let ids: Vec<DbId> = mine.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![third.id, first.id]);
        assert_eq!(mine[0].items[0].product.as_ref(), Some(&product));

        let all = store.list_orders(OrderScope::All).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }

    #[tokio::test]
    async fn unpaid_online_orders_are_hidden() {
        let store = MemoryStore::new();
        store.seed_order(1, PaymentType::Online, false, &[(1, 1)]).await;
        let paid = store.seed_order(1, PaymentType::Online, true, &[(1, 1)]).await;

        let listed = store.list_orders(OrderScope::All).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, paid.id);
        assert_eq!(store.order_count().await, 2);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let user = CreateUser {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "hash".into(),
        };
        store.create_user(&user).await.unwrap();
        assert_matches!(store.create_user(&user).await, Err(StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn unavailable_store_rejects_writes() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert_matches!(
            store.insert_order(&new_order(1, 1)).await,
            Err(StoreError::Unavailable(_))
        );
        assert_eq!(store.order_count().await, 0);

        store.set_unavailable(false);
        assert!(store.health_check().await.is_ok());
    }
}
