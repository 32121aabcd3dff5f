//! Client-side cart model.
//!
//! The cart is never stored by the server. It only exists to produce the
//! `items` of a [`PlaceOrderRequest`](crate::order::PlaceOrderRequest).

use std::collections::BTreeMap;

use crate::order::OrderItemInput;
use crate::types::DbId;

/// Product id → quantity. Quantities are always at least one; a product
/// whose quantity drops to zero is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: BTreeMap<DbId, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product_id`.
    pub fn add(&mut self, product_id: DbId) {
        *self.items.entry(product_id).or_insert(0) += 1;
    }

    /// Set the quantity of `product_id`. Zero removes it.
    pub fn update(&mut self, product_id: DbId, quantity: u32) {
        if quantity == 0 {
            self.items.remove(&product_id);
        } else {
            self.items.insert(product_id, quantity);
        }
    }

    /// Remove one unit of `product_id`, dropping the entry at zero.
    pub fn remove(&mut self, product_id: DbId) {
        if let Some(quantity) = self.items.get_mut(&product_id) {
            *quantity -= 1;
            if *quantity == 0 {
                self.items.remove(&product_id);
            }
        }
    }

    pub fn quantity(&self, product_id: DbId) -> u32 {
        self.items.get(&product_id).copied().unwrap_or(0)
    }

    /// Total number of units across all products.
    pub fn count(&self) -> u64 {
        self.items.values().map(|q| u64::from(*q)).sum()
    }

    /// Sum of unit price × quantity. Products `price_of` does not know are
    /// skipped, the same way the cart page drops products it cannot find.
    pub fn total_amount<F>(&self, price_of: F) -> f64
    where
        F: Fn(DbId) -> Option<f64>,
    {
        self.items
            .iter()
            .filter_map(|(id, qty)| price_of(*id).map(|price| price * f64::from(*qty)))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The `items` array of a checkout request, in product id order.
    pub fn to_order_items(&self) -> Vec<OrderItemInput> {
        self.items
            .iter()
            .map(|(product, quantity)| OrderItemInput {
                product: *product,
                quantity: i64::from(*quantity),
            })
            .collect()
    }
}
