//! Well-known role name constants carried in session tokens.

/// A registered buyer.
pub const ROLE_USER: &str = "user";
/// The storefront operator who manages products and sees every order.
pub const ROLE_SELLER: &str = "seller";
pub const ROLE_ADMIN: &str = "admin";

/// Whether `role` may use the seller-scoped endpoints.
pub fn is_seller_role(role: &str) -> bool {
    role == ROLE_SELLER || role == ROLE_ADMIN
}
