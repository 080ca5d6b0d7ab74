//! Authentication Models
//! Mission: Define user account and token claim structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub created_on: String,
}

/// JWT claims payload.
///
/// Identity only: user id plus expiry. Handlers that need user data
/// re-fetch it by id rather than trusting a snapshot from issuance time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (user id)
    pub exp: usize,  // expiration timestamp
}

impl Claims {
    /// The owner id encoded in the claim, if it parses.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Registration request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub error: bool,
    pub user: UserResponse,
    pub access_token: String,
    pub message: String,
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub error: bool,
    pub message: String,
    pub email: String,
    pub access_token: String,
}

/// User response (sanitized)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub created_on: String,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            created_on: user.created_on.clone(),
        }
    }
}

/// Current-user response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub error: bool,
    pub user: UserResponse,
    pub message: String,
}
