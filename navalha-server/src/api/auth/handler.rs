//! Authentication Handlers
//!
//! Registration, login and current-user lookup.

use std::time::Duration;

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text, validate_password,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{User, UserLogin, UserRegister};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Token plus the account it belongs to.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/register - create an owner account
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserRegister>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let user = match user::create(
        &state.db.write,
        payload.name.trim(),
        payload.email.trim(),
        &password_hash,
        payload.phone.as_deref(),
    )
    .await
    {
        Ok(user) => user,
        // The email column is unique; surface the duplicate without
        // echoing constraint details.
        Err(RepoError::Duplicate(_)) => {
            return Err(AppError::conflict("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/auth/login - email + password login
///
/// Runs with a fixed delay and a unified error message so response
/// timing and wording never reveal whether the email exists.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<UserLogin>,
) -> AppResult<Json<AuthResponse>> {
    let user = user::find_by_email(&state.db.read, &payload.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(user) => {
            if !user.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = verify_password(&payload.password, &user.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                tracing::warn!(email = %payload.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            user
        }
        None => {
            tracing::warn!(email = %payload.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user.id, email = %user.email, "User logged in");

    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/auth/me - current user
///
/// Re-reads the account so a disabled user is caught even while their
/// token is still valid.
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<User>> {
    let user = user::find_by_id(&state.db.read, current_user.id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| AppError::not_found(format!("User {}", current_user.id)))?;

    Ok(Json(user))
}
