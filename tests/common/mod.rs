#![allow(dead_code)]

use std::sync::Arc;

use account_ledger::config::AuthConfig;
use account_ledger::errors::AppError;
use account_ledger::models::Principal;
use account_ledger::services::credentials::{CredentialVerifier, StaticCredentialVerifier};
use account_ledger::services::jwt_service::JwtService;
use account_ledger::store::InMemoryAccountStore;
use account_ledger::{create_app, AppState};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

/// Accepts exactly one plain-text username/password pair.
/// Keeps tests that do not care about hashing fast.
pub struct FixedCredentials;

#[async_trait]
impl CredentialVerifier for FixedCredentials {
    async fn verify(&self, username: &str, password: &str) -> Result<Principal, AppError> {
        if username == "user" && password == "password" {
            Ok(Principal {
                username: username.to_string(),
            })
        } else {
            Err(AppError::Unauthorized("Invalid credentials".to_string()))
        }
    }
}

pub fn test_app() -> Router {
    build(Arc::new(FixedCredentials), false)
}

pub fn guarded_app() -> Router {
    build(Arc::new(FixedCredentials), true)
}

/// App wired with the Argon2-backed verifier built from default config.
pub fn app_with_static_credentials() -> Router {
    let verifier = StaticCredentialVerifier::from_config(&AuthConfig::default())
        .expect("Failed to build verifier");
    build(Arc::new(verifier), false)
}

fn build(credentials: Arc<dyn CredentialVerifier>, auth_required: bool) -> Router {
    let state = AppState::new(
        Arc::new(InMemoryAccountStore::new()),
        credentials,
        JwtService::new(TEST_SECRET, 60),
        auth_required,
    );
    create_app(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("Body is not JSON ({}): {}", e, self.body))
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> TestResponse {
    let body = body.map(|json| json.to_string());
    send_text(app, method, uri, body.as_deref(), bearer).await
}

/// Sends the body exactly as written, so decimal literals reach the server
/// with every digit.
pub async fn send_text(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    bearer: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(text) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(text.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn create_account(
    app: &Router,
    user_id: i64,
    account_type: &str,
    initial: &str,
) -> Value {
    let body = format!(
        r#"{{"userId":{},"type":"{}","initialBalance":{}}}"#,
        user_id, account_type, initial
    );
    let response = send_text(app, Method::POST, "/api/accounts", Some(&body), None).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.json()
}

/// The literal JSON text of an account's balance. Fails unless the balance
/// is written as a JSON number.
pub fn balance(account: &Value) -> String {
    let balance = &account["balance"];
    assert!(balance.is_number(), "balance is not a JSON number: {}", account);
    balance.to_string()
}
