//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Vec<String>,
    pub price: f64,
    pub offer_price: Option<f64>,
    /// Image file names, first one is the thumbnail.
    pub image: Vec<String>,
    pub category: String,
    pub in_stock: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    #[serde(default)]
    pub description: Vec<String>,
    pub price: f64,
    pub offer_price: Option<f64>,
    #[serde(default)]
    pub image: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Defaults to `true` if omitted.
    pub in_stock: Option<bool>,
}
