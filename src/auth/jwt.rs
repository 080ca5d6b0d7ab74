//! JWT Token Handler
//! Mission: Issue and verify signed bearer tokens

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;
use uuid::Uuid;

/// Token verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, foreign signer, or malformed token
    InvalidSignature,
    /// Embedded expiry is in the past
    Expired,
}

/// Issues and verifies HS256 bearer tokens.
///
/// The signing secret and validity window are injected at construction,
/// never read from ambient process state, so tests can use a fixed secret.
pub struct JwtHandler {
    secret: String,
    ttl_minutes: i64,
}

impl JwtHandler {
    pub fn new(secret: String, ttl_minutes: i64) -> Self {
        Self {
            secret,
            ttl_minutes,
        }
    }

    /// Sign an identity-only claim for the given user id.
    ///
    /// Returns the encoded token plus its lifetime in seconds. The claim
    /// carries only the user id and expiry; handlers re-fetch user data
    /// live instead of trusting a snapshot baked in at issuance time.
    pub fn generate_token(&self, user_id: Uuid) -> Result<(String, usize)> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::minutes(self.ttl_minutes))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let expires_in = (self.ttl_minutes * 60) as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration,
        };

        debug!(
            "Issuing token for user {}, valid for {}m",
            user_id, self.ttl_minutes
        );

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign token")?;

        Ok((token, expires_in))
    }

    /// Check signature and expiry, returning the embedded claim.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidSignature,
        })?;

        Ok(decoded.claims)
    }
}
