//! Handler for the seller session (`/seller/login`).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::error::CoreError;
use storefront_core::roles::ROLE_SELLER;

use crate::auth::jwt::{generate_access_token, SELLER_SUBJECT};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::Success;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SellerLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SellerSession {
    pub token: String,
}

/// POST /api/seller/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<SellerLoginRequest>,
) -> AppResult<Json<Success<SellerSession>>> {
    if !state.config.seller.matches(&input.email, &input.password) {
        tracing::info!("Failed seller login attempt");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let token = generate_access_token(SELLER_SUBJECT, ROLE_SELLER, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(Json(Success::new(SellerSession { token })))
}
