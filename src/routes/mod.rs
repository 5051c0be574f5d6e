pub(crate) mod accounts;
pub(crate) mod auth;
pub(crate) mod health;
