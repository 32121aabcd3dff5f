//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input with `storefront_core`, delegate persistence to
//! the [`Store`](storefront_db::Store) in [`AppState`](crate::state::AppState),
//! and map errors via [`AppError`](crate::error::AppError).

pub mod order;
pub mod product;
pub mod seller;
pub mod user;
