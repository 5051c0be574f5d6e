use std::net::SocketAddr;

pub const DEFAULT_JWT_SECRET: &str = "dev-only-insecure-secret-change-me";
pub const DEFAULT_USERNAME: &str = "user";
pub const DEFAULT_PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(format!(
                "Invalid STORAGE_BACKEND: {}. Must be 'postgres' or 'memory'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

/// Where the login password comes from. A configured hash wins over a plain password.
#[derive(Clone)]
pub enum PasswordSource {
    Hash(String),
    Plain(String),
}

impl std::fmt::Debug for PasswordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordSource::Hash(_) => f.write_str("Hash(..)"),
            PasswordSource::Plain(_) => f.write_str("Plain(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: PasswordSource,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
    pub required: bool,
}

impl AuthConfig {
    pub fn uses_default_credentials(&self) -> bool {
        self.username == DEFAULT_USERNAME
            && matches!(&self.password, PasswordSource::Plain(p) if p == DEFAULT_PASSWORD)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: PasswordSource::Plain(DEFAULT_PASSWORD.to_string()),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiry_minutes: 60,
            required: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = StorageBackend::parse(
            &std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".to_string()),
        )?;

        let password = match std::env::var("AUTH_PASSWORD_HASH") {
            Ok(hash) => PasswordSource::Hash(hash),
            Err(_) => PasswordSource::Plain(
                std::env::var("AUTH_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string()),
            ),
        };

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            storage: StorageConfig {
                backend,
                database_url: std::env::var("DATABASE_URL").ok(),
                max_connections: std::env::var("DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },
            auth: AuthConfig {
                username: std::env::var("AUTH_USERNAME")
                    .unwrap_or_else(|_| DEFAULT_USERNAME.to_string()),
                password,
                jwt_secret: std::env::var("JWT_SECRET")
                    .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
                jwt_expiry_minutes: std::env::var("JWT_EXPIRY_MINUTES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
                required: parse_flag(std::env::var("AUTH_REQUIRED").ok().as_deref()),
            },
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        self.bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| format!("Invalid BIND_ADDR {}: {}", self.bind_addr, e))?;
        if self.storage.backend == StorageBackend::Postgres && self.storage.database_url.is_none() {
            return Err("STORAGE_BACKEND is postgres but DATABASE_URL is not set".to_string());
        }
        if self.storage.max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }
        if self.auth.username.trim().is_empty() {
            return Err("AUTH_USERNAME cannot be empty".to_string());
        }
        if self.auth.jwt_secret.is_empty() {
            return Err("JWT_SECRET cannot be empty".to_string());
        }
        if self.auth.jwt_expiry_minutes <= 0 {
            return Err("JWT_EXPIRY_MINUTES must be positive".to_string());
        }
        Ok(())
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}
