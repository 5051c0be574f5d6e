use std::sync::Arc;

use crate::services::account_service::AccountService;
use crate::services::credentials::CredentialVerifier;
use crate::services::jwt_service::JwtService;
use crate::store::AccountStore;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub jwt: JwtService,
    pub auth_required: bool,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AccountStore>,
        credentials: Arc<dyn CredentialVerifier>,
        jwt: JwtService,
        auth_required: bool,
    ) -> Self {
        Self {
            accounts: AccountService::new(store),
            credentials,
            jwt,
            auth_required,
        }
    }
}
