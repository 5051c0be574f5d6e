use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tracing::{error, info};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/ready", get(ready))
}

async fn health() -> &'static str {
    info!("GET /health - Health check");
    "OK"
}

// Ready once the account store answers.
async fn ready(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.accounts.ping().await {
        Ok(()) => (StatusCode::OK, "READY"),
        Err(e) => {
            error!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}
