use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::errors::AppError;
use crate::models::{AccessTokenClaims, Principal};

/// Issues and validates HS256 bearer tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_minutes: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiry_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_minutes,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        if config.uses_default_secret() {
            tracing::warn!("JWT_SECRET not set; tokens are signed with the development secret");
        }
        Self::new(&config.jwt_secret, config.jwt_expiry_minutes)
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: principal.username.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode access token: {}", e)))
    }

    pub fn validate(&self, token: &str) -> Result<AccessTokenClaims, AppError> {
        decode::<AccessTokenClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                AppError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}
