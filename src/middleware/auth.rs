use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("{} {} - missing bearer token", req.method(), req.uri().path());
            AppError::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

    let claims = state.jwt.validate(token)?;
    debug!(
        subject = %claims.sub,
        "{} {} - bearer token accepted",
        req.method(),
        req.uri().path()
    );

    Ok(next.run(req).await)
}
