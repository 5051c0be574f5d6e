use std::sync::Arc;

use bigdecimal::BigDecimal;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, error, info, warn};

use crate::errors::AppError;
use crate::models::{
    is_negative, Account, BalanceOperation, CreateAccount, NewAccount, UpdateAccount,
};
use crate::services::account_locks::AccountLocks;
use crate::store::AccountStore;

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    locks: AccountLocks,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            locks: AccountLocks::new(),
        }
    }

    pub async fn create(&self, input: CreateAccount) -> Result<Account, AppError> {
        info!(
            "Creating new account for user_id={}, type={}, initial_balance={:?}",
            input.user_id, input.account_type, input.initial_balance
        );

        let balance = match input.initial_balance {
            Some(balance) if !is_negative(&balance) => balance,
            other => {
                error!("Invalid initial balance: {:?}", other);
                return Err(AppError::Validation("Invalid initial balance".into()));
            }
        };

        let account = self
            .store
            .insert(NewAccount::new(input.user_id, input.account_type, balance))
            .await?;
        debug!("Account created successfully: {}", account.id);
        Ok(account)
    }

    pub async fn fetch_one(&self, id: i64) -> Result<Account, AppError> {
        info!("Fetching account with id={}", id);
        self.store.find_by_id(id).await?.ok_or_else(|| {
            warn!("Account not found: id={}", id);
            AppError::account_not_found()
        })
    }

    pub async fn fetch_all(&self) -> Result<Vec<Account>, AppError> {
        info!("Fetching all accounts");
        let accounts = self.store.find_all().await?;
        debug!("Total accounts found: {}", accounts.len());
        Ok(accounts)
    }

    /// Overwrites the supplied fields and persists the whole record.
    pub async fn update(&self, id: i64, input: UpdateAccount) -> Result<Account, AppError> {
        info!("Updating account id={}", id);
        let (_guard, mut account) = self.load_locked(id).await?.ok_or_else(|| {
            error!("Account not found: id={}", id);
            AppError::account_not_found()
        })?;

        if let Some(balance) = &input.initial_balance {
            if is_negative(balance) {
                error!("Invalid balance for update: id={}, balance={}", id, balance);
                return Err(AppError::Validation("Invalid initial balance".into()));
            }
        }
        if let Some(account_type) = input.account_type {
            account.account_type = account_type;
        }
        if let Some(balance) = input.initial_balance {
            account.balance = balance;
        }

        let updated = self.store.save(account).await?;
        debug!(
            "Account updated: id={}, type={}, balance={}",
            updated.id, updated.account_type, updated.balance
        );
        Ok(updated)
    }

    /// Deposits into or withdraws from an account.
    ///
    /// The load, the balance check and the write happen under the account's
    /// mutation lock, so concurrent operations on one account are applied
    /// one after another. Any rejected request leaves the stored balance as
    /// it was.
    pub async fn apply_balance_operation(
        &self,
        id: i64,
        amount: BigDecimal,
        operation: &str,
    ) -> Result<Account, AppError> {
        info!(
            "Updating balance for account id={}, operation={}, amount={}",
            id, operation, amount
        );
        let (_guard, mut account) = self.load_locked(id).await?.ok_or_else(|| {
            error!("Account not found for update: id={}", id);
            AppError::account_not_found()
        })?;

        let operation: BalanceOperation = operation.parse().map_err(|e| {
            error!("Invalid operation: {}", operation);
            e
        })?;

        if amount <= BigDecimal::from(0) {
            error!("Rejected non-positive amount {} for account id={}", amount, id);
            return Err(AppError::Validation("Amount must be greater than zero".into()));
        }

        account.balance = operation.apply(&account.balance, &amount).map_err(|e| {
            error!(
                "Insufficient funds for withdrawal: id={}, balance={}, requested={}",
                id, account.balance, amount
            );
            e
        })?;
        debug!(
            "Applied {} of {} to account id={}. New balance={}",
            operation, amount, id, account.balance
        );

        let updated = self.store.save(account).await?;
        Ok(updated)
    }

    /// Takes the account's mutation lock and loads the account under it.
    ///
    /// Ids that do not exist never get a lock entry. An account deleted while
    /// the caller waited has its entry dropped again, since ids are not reused.
    async fn load_locked(
        &self,
        id: i64,
    ) -> Result<Option<(OwnedMutexGuard<()>, Account)>, AppError> {
        if !self.store.exists_by_id(id).await? {
            return Ok(None);
        }

        let guard = self.locks.acquire(id).await;
        match self.store.find_by_id(id).await? {
            Some(account) => Ok(Some((guard, account))),
            None => {
                drop(guard);
                self.locks.forget(id);
                Ok(None)
            }
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.store.ping().await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        info!("Deleting account id={}", id);
        if !self.store.exists_by_id(id).await? {
            warn!("Account not found for deletion: id={}", id);
            return Err(AppError::account_not_found());
        }

        let guard = self.locks.acquire(id).await;
        self.store.delete_by_id(id).await?;
        drop(guard);
        self.locks.forget(id);

        debug!("Account deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryAccountStore;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn service() -> AccountService {
        AccountService::new(Arc::new(InMemoryAccountStore::new()))
    }

    fn savings(initial: &str) -> CreateAccount {
        CreateAccount {
            user_id: 1,
            account_type: "SAVINGS".to_string(),
            initial_balance: Some(dec(initial)),
        }
    }

    #[tokio::test]
    async fn test_create_sets_balance_and_status() {
        let svc = service();
        let account = svc.create(savings("100.0")).await.unwrap();
        assert_eq!(account.id, 1);
        assert_eq!(account.user_id, 1);
        assert_eq!(account.balance, dec("100"));
        assert_eq!(account.status, "Active");
    }

    #[tokio::test]
    async fn test_create_rejects_negative_or_missing_balance() {
        let store = Arc::new(InMemoryAccountStore::new());
        let svc = AccountService::new(store.clone());

        let err = svc.create(savings("-0.01")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let missing = CreateAccount {
            user_id: 1,
            account_type: "SAVINGS".to_string(),
            initial_balance: None,
        };
        let err = svc.create(missing).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_create_allows_zero_balance() {
        let svc = service();
        let account = svc.create(savings("0")).await.unwrap();
        assert_eq!(account.balance, BigDecimal::from(0));
    }

    #[tokio::test]
    async fn test_withdraw_scenario() {
        let svc = service();
        let account = svc.create(savings("100.0")).await.unwrap();

        let account = svc
            .apply_balance_operation(account.id, dec("50.0"), "withdraw")
            .await
            .unwrap();
        assert_eq!(account.balance, dec("50"));

        let err = svc
            .apply_balance_operation(account.id, dec("200.0"), "withdraw")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientFunds));

        let stored = svc.fetch_one(account.id).await.unwrap();
        assert_eq!(stored.balance, dec("50"));
    }

    #[tokio::test]
    async fn test_withdraw_exact_balance() {
        let svc = service();
        let account = svc.create(savings("75.25")).await.unwrap();
        let account = svc
            .apply_balance_operation(account.id, dec("75.25"), "withdraw")
            .await
            .unwrap();
        assert_eq!(account.balance, BigDecimal::from(0));
    }

    #[tokio::test]
    async fn test_deposit_withdraw_inverse_pair() {
        let svc = service();
        let account = svc.create(savings("10.10")).await.unwrap();
        let original = account.balance.clone();

        for amount in ["0.1", "0.2", "3.33", "10.10"] {
            svc.apply_balance_operation(account.id, dec(amount), "deposit")
                .await
                .unwrap();
            let restored = svc
                .apply_balance_operation(account.id, dec(amount), "withdraw")
                .await
                .unwrap();
            assert_eq!(restored.balance, original, "amount {}", amount);
        }
    }

    #[tokio::test]
    async fn test_operation_tokens_case_insensitive() {
        let svc = service();
        let account = svc.create(savings("0")).await.unwrap();
        for token in ["DEPOSIT", "Deposit", "deposit"] {
            svc.apply_balance_operation(account.id, dec("1"), token)
                .await
                .unwrap();
        }
        assert_eq!(svc.fetch_one(account.id).await.unwrap().balance, dec("3"));
    }

    #[tokio::test]
    async fn test_unknown_operation_leaves_balance() {
        let svc = service();
        let account = svc.create(savings("20")).await.unwrap();
        let err = svc
            .apply_balance_operation(account.id, dec("5"), "transfer")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidOperation(_)));
        assert_eq!(svc.fetch_one(account.id).await.unwrap().balance, dec("20"));
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let svc = service();
        let err = svc
            .apply_balance_operation(99, dec("5"), "deposit")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let svc = service();
        let account = svc.create(savings("20")).await.unwrap();
        for amount in ["0", "-5"] {
            for op in ["deposit", "withdraw"] {
                let err = svc
                    .apply_balance_operation(account.id, dec(amount), op)
                    .await
                    .unwrap_err();
                assert!(matches!(err, AppError::Validation(_)));
            }
        }
        assert_eq!(svc.fetch_one(account.id).await.unwrap().balance, dec("20"));
    }

    #[tokio::test]
    async fn test_update_overwrites_supplied_fields_only() {
        let svc = service();
        let account = svc.create(savings("20")).await.unwrap();

        let updated = svc
            .update(
                account.id,
                UpdateAccount {
                    account_type: Some("CHECKING".to_string()),
                    initial_balance: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.account_type, "CHECKING");
        assert_eq!(updated.balance, dec("20"));

        let updated = svc
            .update(
                account.id,
                UpdateAccount {
                    account_type: None,
                    initial_balance: Some(dec("500")),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.account_type, "CHECKING");
        assert_eq!(updated.balance, dec("500"));
        assert_eq!(updated.user_id, account.user_id);
        assert_eq!(updated.status, "Active");
    }

    #[tokio::test]
    async fn test_update_rejects_negative_balance() {
        let svc = service();
        let account = svc.create(savings("20")).await.unwrap();
        let err = svc
            .update(
                account.id,
                UpdateAccount {
                    account_type: Some("CHECKING".to_string()),
                    initial_balance: Some(dec("-1")),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let stored = svc.fetch_one(account.id).await.unwrap();
        assert_eq!(stored.account_type, "SAVINGS");
        assert_eq!(stored.balance, dec("20"));
    }

    #[tokio::test]
    async fn test_update_unknown_account() {
        let svc = service();
        let err = svc.update(5, UpdateAccount::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_ids_leave_no_lock_entries() {
        let svc = service();
        for id in 1..=200 {
            let err = svc
                .apply_balance_operation(id, dec("5"), "deposit")
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
            let err = svc.update(id, UpdateAccount::default()).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)));
        }
        assert_eq!(svc.locks.len(), 0);

        let account = svc.create(savings("1")).await.unwrap();
        svc.apply_balance_operation(account.id, dec("1"), "deposit")
            .await
            .unwrap();
        assert_eq!(svc.locks.len(), 1);
        svc.delete(account.id).await.unwrap();
        assert_eq!(svc.locks.len(), 0);

        svc.apply_balance_operation(account.id, dec("1"), "deposit")
            .await
            .unwrap_err();
        assert!(svc.locks.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let svc = service();
        assert!(matches!(svc.delete(1).await.unwrap_err(), AppError::NotFound(_)));

        let account = svc.create(savings("1")).await.unwrap();
        svc.delete(account.id).await.unwrap();
        assert!(matches!(
            svc.fetch_one(account.id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(svc.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_deposits_are_not_lost() {
        let svc = service();
        let account_id = svc.create(savings("0")).await.unwrap().id;

        let tasks: Vec<_> = (0..100)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move {
                    svc.apply_balance_operation(account_id, dec("1.5"), "deposit")
                        .await
                })
            })
            .collect();
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        assert_eq!(svc.fetch_one(account_id).await.unwrap().balance, dec("150"));
    }

    #[tokio::test]
    async fn test_concurrent_withdrawals_never_overdraw() {
        let svc = service();
        let account_id = svc.create(savings("10")).await.unwrap().id;

        let tasks: Vec<_> = (0..25)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move {
                    svc.apply_balance_operation(account_id, dec("1"), "withdraw")
                        .await
                })
            })
            .collect();
        let succeeded = futures::future::join_all(tasks)
            .await
            .into_iter()
            .filter(|r| matches!(r, Ok(Ok(_))))
            .count();

        assert_eq!(succeeded, 10);
        assert_eq!(svc.fetch_one(account_id).await.unwrap().balance, BigDecimal::from(0));
    }
}
