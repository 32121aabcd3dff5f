//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the session from a JWT Bearer token.
//! - [`rbac::RequireBuyer`] -- Requires a buyer (`user` role) session.
//! - [`rbac::RequireSeller`] -- Requires `seller` or `admin` role.

pub mod auth;
pub mod rbac;
