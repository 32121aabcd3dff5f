//! Handlers for buyer accounts (`/user/register`, `/user/login`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::error::CoreError;
use storefront_core::roles::ROLE_USER;
use storefront_db::models::user::{CreateUser, User};
use validator::{Validate, ValidationErrors};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::Success;
use crate::state::AppState;

/// Request body for `POST /user/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
}

/// Request body for `POST /user/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Success<Session>>)> {
    input.name = input.name.trim().to_string();
    input.email = normalize_email(&input.email);
    input
        .validate()
        .map_err(|e| CoreError::Validation(describe_validation_errors(&e)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(&CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
        })
        .await?;
    tracing::info!(user_id = user.id, "User registered");

    let session = issue_session(&state, user)?;
    Ok((StatusCode::CREATED, Json(Success::new(session))))
}

/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<Success<Session>>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let Some(user) = state
        .store
        .find_user_by_email(&normalize_email(&input.email))
        .await?
    else {
        verify_dummy(&input.password);
        return Err(invalid());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    Ok(Json(Success::new(issue_session(&state, user)?)))
}

fn issue_session(state: &AppState, user: User) -> AppResult<Session> {
    let token = generate_access_token(user.id, ROLE_USER, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(Session { token, user })
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Flatten field errors into one message, sorted so the output is stable.
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
