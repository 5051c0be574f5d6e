use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{Account, BalanceUpdate, CreateAccount, UpdateAccount};
use crate::state::AppState;
use crate::utils::json::AppJson;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_account).get(list_accounts))
        .route("/:id", get(get_account).put(update_account).delete(delete_account))
        .route("/:id/balance", put(update_balance))
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/accounts",
    request_body = CreateAccount,
    responses(
        (status = 201, description = "Account created", body = Account),
        (status = 400, description = "Invalid initial balance or malformed body"),
        (status = 401, description = "Missing or invalid bearer token")
    ),
    tag = "Account Management",
    security(("bearerAuth" = []))
)]
pub async fn create_account(
    State(state): State<AppState>,
    AppJson(data): AppJson<CreateAccount>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    info!("POST /accounts - Creating new account");
    let account = state.accounts.create(data).await.map_err(|e| {
        error!("Failed to create account: {}", e);
        e
    })?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Get account by ID
#[utoipa::path(
    get,
    path = "/api/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account found", body = Account),
        (status = 404, description = "Account not found")
    ),
    tag = "Account Management",
    security(("bearerAuth" = []))
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Account>, AppError> {
    info!("GET /accounts/{} - Fetching account", id);
    let account = state.accounts.fetch_one(id).await?;
    Ok(Json(account))
}

/// Get all accounts
#[utoipa::path(
    get,
    path = "/api/accounts",
    responses(
        (status = 200, description = "All accounts ordered by id", body = [Account])
    ),
    tag = "Account Management",
    security(("bearerAuth" = []))
)]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>, AppError> {
    info!("GET /accounts - Fetching all accounts");
    let accounts = state.accounts.fetch_all().await.map_err(|e| {
        error!("Failed to fetch accounts: {}", e);
        e
    })?;
    Ok(Json(accounts))
}

/// Update account type or balance
#[utoipa::path(
    put,
    path = "/api/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Account updated", body = Account),
        (status = 400, description = "Negative balance or malformed body"),
        (status = 404, description = "Account not found")
    ),
    tag = "Account Management",
    security(("bearerAuth" = []))
)]
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(data): AppJson<UpdateAccount>,
) -> Result<Json<Account>, AppError> {
    info!("PUT /accounts/{} - Updating account", id);
    let account = state.accounts.update(id, data).await.map_err(|e| {
        error!("Failed to update account {}: {}", id, e);
        e
    })?;
    Ok(Json(account))
}

/// Deposit into or withdraw from an account
#[utoipa::path(
    put,
    path = "/api/accounts/{id}/balance",
    params(("id" = i64, Path, description = "Account id")),
    request_body = BalanceUpdate,
    responses(
        (status = 200, description = "Balance updated", body = Account),
        (status = 400, description = "Rejected operation or amount, or insufficient funds"),
        (status = 404, description = "Account not found")
    ),
    tag = "Account Management",
    security(("bearerAuth" = []))
)]
pub async fn update_balance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(data): AppJson<BalanceUpdate>,
) -> Result<Json<Account>, AppError> {
    // an absent operation fails the token check like any unknown one
    let operation = data.operation.unwrap_or_default();
    info!("PUT /accounts/{}/balance - {} {}", id, operation, data.amount);
    let account = state
        .accounts
        .apply_balance_operation(id, data.amount, &operation)
        .await
        .map_err(|e| {
            error!("Failed to update balance of account {}: {}", id, e);
            e
        })?;
    Ok(Json(account))
}

/// Delete account
#[utoipa::path(
    delete,
    path = "/api/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found")
    ),
    tag = "Account Management",
    security(("bearerAuth" = []))
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /accounts/{} - Deleting account", id);
    state.accounts.delete(id).await.map_err(|e| {
        error!("Failed to delete account {}: {}", id, e);
        e
    })?;
    Ok(StatusCode::NO_CONTENT)
}
