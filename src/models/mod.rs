mod account;
mod auth;
pub(crate) mod decimal;

pub(crate) use account::is_negative;
pub use account::{
    Account, BalanceOperation, BalanceUpdate, CreateAccount, NewAccount, UpdateAccount,
    DEFAULT_STATUS,
};
pub use auth::{AccessTokenClaims, LoginParams, Principal, TokenResponse};
