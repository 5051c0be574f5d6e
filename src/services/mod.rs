pub mod account_locks;
pub mod account_service;
pub mod credentials;
pub mod jwt_service;
