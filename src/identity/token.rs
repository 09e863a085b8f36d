//! HS256 bearer tokens.
//!
//! Tokens are minted by the external user system; this module verifies
//! them and can also mint them for tests and local tooling.

use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;
use crate::error::BookingError;

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account id.
    pub sub: Uuid,
    /// Role name (`"client"`, `"troupe_leader"`, `"clown"`, or anything else).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// Signing configuration for access tokens.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret.
    pub secret: String,
    /// Lifetime of minted tokens, in minutes.
    pub token_expiry_mins: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry_mins", &self.token_expiry_mins)
            .finish()
    }
}

/// Mints an HS256 token for the given account and role.
///
/// # Errors
///
/// Returns [`BookingError::Internal`] if signing fails.
pub fn issue_token(user_id: UserId, role: &str, config: &JwtConfig) -> Result<String, BookingError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.into(),
        role: role.to_string(),
        exp: now + config.token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| BookingError::Internal(format!("token signing failed: {e}")))
}

/// Verifies signature and expiry and returns the embedded [`Claims`].
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] for any invalid token.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, BookingError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| BookingError::Unauthorized("invalid or expired token".to_string()))
}
