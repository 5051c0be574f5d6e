use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::{AuthConfig, PasswordSource};
use crate::errors::AppError;
use crate::models::Principal;
use crate::utils::password::{hash_password, verify_password};

/// Checks a username/password pair and yields the authenticated principal.
///
/// Token issuance lives in [`crate::services::jwt_service::JwtService`]; a
/// verifier only answers "who is this".
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<Principal, AppError>;
}

/// A single configured user with an Argon2 password hash.
pub struct StaticCredentialVerifier {
    username: String,
    password_hash: String,
}

impl StaticCredentialVerifier {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// Builds the verifier from config, hashing a plain password once at startup.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AppError> {
        if config.uses_default_credentials() {
            warn!("Using default demo credentials; set AUTH_USERNAME and AUTH_PASSWORD_HASH");
        }
        let password_hash = match &config.password {
            PasswordSource::Hash(hash) => hash.clone(),
            PasswordSource::Plain(password) => hash_password(password)?,
        };
        info!("Credential verifier configured for user '{}'", config.username);
        Ok(Self::new(config.username.clone(), password_hash))
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<Principal, AppError> {
        let password_ok = verify_password(password, &self.password_hash)?;
        if username == self.username && password_ok {
            return Ok(Principal {
                username: username.to_string(),
            });
        }
        warn!("Rejected login attempt for user '{}'", username);
        Err(AppError::Unauthorized("Invalid credentials".to_string()))
    }
}
