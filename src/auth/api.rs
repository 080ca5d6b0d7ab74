//! Account API Endpoints
//! Mission: Registration, login, and current-user lookup

use crate::{
    app::AppState,
    auth::models::{
        Claims, LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
        UserResponse,
    },
    error::ApiError,
};
use anyhow::Context;
use axum::{extract::State, Extension, Json};
use tracing::{info, warn};

/// Create account - POST /create-account
pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let full_name = required_field(payload.full_name, "Full Name is required")?;
    let email = required_field(payload.email, "Email is required")?;
    let password = required_field(payload.password, "Password is required")?;

    let user = state
        .user_store
        .create_user(&full_name, &email, &password)?
        .ok_or(ApiError::Conflict)?;

    let (access_token, _expires_in) = state.jwt_handler.generate_token(user.id)?;

    Ok(Json(RegisterResponse {
        error: false,
        user: UserResponse::from_user(&user),
        access_token,
        message: "Registration Successful".to_string(),
    }))
}

/// Login - POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = required_field(payload.email, "Email not given")?;
    let password = required_field(payload.password, "Password not given")?;

    let user = state
        .user_store
        .get_user_by_email(&email)?
        .ok_or(ApiError::UserNotFound)?;

    let valid =
        bcrypt::verify(&password, &user.password_hash).context("Failed to verify password")?;
    if !valid {
        warn!("Failed login attempt: {}", email);
        return Err(ApiError::InvalidCredentials);
    }

    let (access_token, _expires_in) = state.jwt_handler.generate_token(user.id)?;

    info!("🔐 Login successful: {}", user.email);

    Ok(Json(LoginResponse {
        error: false,
        message: "Login Successful".to_string(),
        email: user.email,
        access_token,
    }))
}

/// Get current user - GET /get-user
///
/// The claim is identity-only, so the profile is always re-fetched from
/// the store. A claim whose id no longer resolves (account gone) is
/// treated as unauthenticated.
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = claims.user_id().ok_or(ApiError::Unauthenticated)?;

    let user = state
        .user_store
        .get_user_by_id(&user_id)?
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(ProfileResponse {
        error: false,
        user: UserResponse::from_user(&user),
        message: String::new(),
    }))
}

/// Reject missing or blank required fields with the endpoint's message.
fn required_field(value: Option<String>, message: &'static str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation(message)),
    }
}
