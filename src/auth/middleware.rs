//! Authentication Middleware
//! Mission: Gate protected endpoints behind bearer-token verification

use crate::auth::jwt::{JwtHandler, TokenError};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Auth gate layered on every protected route.
///
/// Pure pass/fail filter: extracts the bearer token, verifies it, and
/// attaches the resolved claims to the request. It never touches the
/// stores. Missing token fails 401 before the handler runs; a bad or
/// expired token fails 403.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt_handler.verify_token(&token).map_err(|err| match err {
        TokenError::Expired => AuthError::ExpiredToken,
        TokenError::InvalidSignature => AuthError::InvalidToken,
    })?;

    // Handlers read the claims back out of request extensions.
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Auth gate failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid token"),
            AuthError::ExpiredToken => (StatusCode::FORBIDDEN, "Token expired"),
        };

        let body = Json(json!({ "error": true, "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_unauthorized() {
        let response = AuthError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bad_tokens_are_forbidden() {
        let invalid = AuthError::InvalidToken.into_response();
        assert_eq!(invalid.status(), StatusCode::FORBIDDEN);

        let expired = AuthError::ExpiredToken.into_response();
        assert_eq!(expired.status(), StatusCode::FORBIDDEN);
    }
}
