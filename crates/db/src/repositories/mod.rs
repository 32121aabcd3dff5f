//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

pub use order_repo::OrderRepo;
pub use product_repo::ProductRepo;
pub use user_repo::UserRepo;
