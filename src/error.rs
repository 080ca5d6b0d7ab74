//! API error taxonomy.
//!
//! Every domain failure is translated to a status code plus the
//! `{error, message}` JSON envelope here; nothing reaches the transport
//! layer as an unhandled fault. Internal causes are logged server-side
//! and never leaked to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures surfaced by account and note endpoints
#[derive(Debug)]
pub enum ApiError {
    /// Missing or empty required field
    Validation(&'static str),
    /// Email already registered
    Conflict,
    /// No user matches the given email
    UserNotFound,
    /// Password comparison failed
    InvalidCredentials,
    /// No note matches both note id and owner id
    NoteNotFound,
    /// Identity claim no longer resolves to a stored user
    Unauthenticated,
    /// Persistence or other unexpected failure
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict => (StatusCode::BAD_REQUEST, "The user already exists"),
            ApiError::UserNotFound => (StatusCode::BAD_REQUEST, "User not found"),
            ApiError::InvalidCredentials => (StatusCode::BAD_REQUEST, "Invalid Credentials"),
            ApiError::NoteNotFound => (StatusCode::BAD_REQUEST, "No such notes found"),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Authentication required"),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        let body = Json(json!({ "error": true, "message": message }));
        (status, body).into_response()
    }
}
