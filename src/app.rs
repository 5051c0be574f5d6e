use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::auth::require_bearer;
use crate::openapi::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use crate::routes::{accounts, auth, health};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    let mut account_routes = accounts::router();
    if state.auth_required {
        account_routes = account_routes
            .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));
    }

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/accounts", account_routes)
        .nest("/api/auth", auth::router())
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
