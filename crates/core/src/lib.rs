//! Domain types shared by the storefront crates.
//!
//! Nothing in here touches the database or HTTP; the `db` and `api` crates
//! build on these types.

pub mod cart;
pub mod error;
pub mod order;
pub mod roles;
pub mod types;
