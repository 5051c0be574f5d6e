use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::errors::AppError;

pub const DEFAULT_STATUS: &str = "Active";

// A user's funds held under a given type (e.g. "SAVINGS", "CHECKING").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = 1)]
    pub user_id: i64,
    #[serde(rename = "type")]
    #[schema(example = "SAVINGS")]
    pub account_type: String,
    #[serde(with = "crate::models::decimal")]
    #[schema(value_type = f64, example = 100.0)]
    pub balance: BigDecimal,
    #[schema(example = "Active")]
    pub status: String,
}

/// An account that has not been assigned an id by the store yet.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_id: i64,
    pub account_type: String,
    pub balance: BigDecimal,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    #[schema(example = 1)]
    pub user_id: i64,
    #[serde(rename = "type")]
    #[schema(example = "SAVINGS")]
    pub account_type: String,
    #[serde(default, with = "crate::models::decimal::option")]
    #[schema(value_type = f64, example = 100.0)]
    pub initial_balance: Option<BigDecimal>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccount {
    #[serde(rename = "type")]
    #[schema(example = "CHECKING")]
    pub account_type: Option<String>,
    #[serde(default, with = "crate::models::decimal::option")]
    #[schema(value_type = Option<f64>, example = 250.5)]
    pub initial_balance: Option<BigDecimal>,
}

/// Body of a deposit or withdrawal. A missing operation is rejected the same
/// way as an unknown one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BalanceUpdate {
    #[serde(with = "crate::models::decimal")]
    #[schema(value_type = f64, example = 50.0)]
    pub amount: BigDecimal,
    #[schema(example = "deposit")]
    pub operation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceOperation {
    Deposit,
    Withdraw,
}

impl FromStr for BalanceOperation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("deposit") {
            Ok(BalanceOperation::Deposit)
        } else if s.eq_ignore_ascii_case("withdraw") {
            Ok(BalanceOperation::Withdraw)
        } else {
            Err(AppError::InvalidOperation(s.to_string()))
        }
    }
}

impl BalanceOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceOperation::Deposit => "deposit",
            BalanceOperation::Withdraw => "withdraw",
        }
    }

    /// Computes the balance that results from applying this operation.
    ///
    /// Withdrawals never take the balance below zero; withdrawing the exact
    /// balance is allowed.
    pub fn apply(&self, balance: &BigDecimal, amount: &BigDecimal) -> Result<BigDecimal, AppError> {
        match self {
            BalanceOperation::Deposit => Ok(balance + amount),
            BalanceOperation::Withdraw => {
                if balance < amount {
                    return Err(AppError::InsufficientFunds);
                }
                Ok(balance - amount)
            }
        }
    }
}

impl std::fmt::Display for BalanceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl NewAccount {
    pub fn new(user_id: i64, account_type: String, balance: BigDecimal) -> Self {
        Self {
            user_id,
            account_type,
            balance,
            status: DEFAULT_STATUS.to_string(),
        }
    }

    pub(crate) fn with_id(self, id: i64) -> Account {
        Account {
            id,
            user_id: self.user_id,
            account_type: self.account_type,
            balance: self.balance,
            status: self.status,
        }
    }
}

pub(crate) fn is_negative(value: &BigDecimal) -> bool {
    value < &BigDecimal::from(0)
}
