use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::ApiError;

/// JWT claims carried by every authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.token_expiry_hours;

        Self {
            sub: user_id,
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
        }
    }
}

pub fn issue_token(claims: &Claims) -> Result<String, ApiError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(ApiError::Internal("JWT secret not configured".to_string()));
    }

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("token generation failed: {}", e)))
}

pub fn verify_token(token: &str) -> Result<Claims, ApiError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(ApiError::Internal("JWT secret not configured".to_string()));
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| ApiError::Unauthorized(format!("invalid token: {}", e)))
}
