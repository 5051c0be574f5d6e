use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{LoginParams, TokenResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
}

/// Login to get a JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    params(LoginParams),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> Result<Json<TokenResponse>, AppError> {
    info!("POST /auth/login - Login attempt for '{}'", params.username);
    let principal = state
        .credentials
        .verify(&params.username, &params.password)
        .await?;
    let token = state.jwt.issue(&principal)?;
    info!("Issued token for '{}'", principal.username);
    Ok(Json(TokenResponse { token }))
}
