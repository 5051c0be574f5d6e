use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::errors::AppError;

/// `Json` extractor whose rejections are plain 400 responses.
///
/// Malformed bodies and missing required fields come back as
/// `AppError::Validation` instead of axum's 415/422 defaults.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!("Rejected request body: {}", rejection.body_text());
            AppError::Validation(rejection.body_text())
        })?;
        Ok(AppJson(value))
    }
}
