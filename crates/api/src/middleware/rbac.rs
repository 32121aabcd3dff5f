//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects sessions whose role does
//! not fit the route, so authorization is enforced at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_core::roles::{is_seller_role, ROLE_USER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a buyer session. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn my_orders(RequireBuyer(user): RequireBuyer) -> AppResult<Json<()>> {
///     // user.user_id is a row in `users`
///     Ok(Json(()))
/// }
/// ```
pub struct RequireBuyer(pub AuthUser);

impl FromRequestParts<AppState> for RequireBuyer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_USER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Buyer account required".into(),
            )));
        }
        Ok(RequireBuyer(user))
    }
}

/// Requires `seller` or `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireSeller(pub AuthUser);

impl FromRequestParts<AppState> for RequireSeller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_seller_role(&user.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Seller role required".into(),
            )));
        }
        Ok(RequireSeller(user))
    }
}
