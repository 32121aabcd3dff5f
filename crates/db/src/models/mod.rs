//! Row types and DTOs for the storefront tables.

pub mod order;
pub mod product;
pub mod user;
