use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use account_ledger::config::{AppConfig, StorageBackend, StorageConfig};
use account_ledger::logging::{init_logging, LoggingConfig};
use account_ledger::services::credentials::StaticCredentialVerifier;
use account_ledger::services::jwt_service::JwtService;
use account_ledger::store::{AccountStore, InMemoryAccountStore, PgAccountStore};
use account_ledger::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env().map_err(anyhow::Error::msg)?;
    config.validate().map_err(anyhow::Error::msg)?;

    let store = connect_store(&config.storage).await?;
    let credentials = StaticCredentialVerifier::from_config(&config.auth)
        .context("Failed to configure credential verifier")?;
    let jwt = JwtService::from_config(&config.auth);
    if config.auth.required {
        tracing::info!("Bearer token required on /api/accounts");
    }

    let state = AppState::new(store, Arc::new(credentials), jwt, config.auth.required);
    let app = create_app(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Account ledger running at http://{}/", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn connect_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn AccountStore>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory account store; data is lost on restart");
            Ok(Arc::new(InMemoryAccountStore::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
                .context("Failed to connect to Postgres")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Connected to Postgres, migrations applied");
            Ok(Arc::new(PgAccountStore::new(pool)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
