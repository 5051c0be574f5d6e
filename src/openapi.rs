use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{Account, BalanceUpdate, CreateAccount, TokenResponse, UpdateAccount};
use crate::routes::{accounts, auth};

/// Path of the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/v3/api-docs";
/// Mount point of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::create_account,
        accounts::get_account,
        accounts::list_accounts,
        accounts::update_account,
        accounts::update_balance,
        accounts::delete_account,
        auth::login,
    ),
    components(schemas(Account, CreateAccount, UpdateAccount, BalanceUpdate, TokenResponse)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account Management", description = "CRUD operations for bank accounts"),
        (name = "Authentication", description = "Login and JWT token generation"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
