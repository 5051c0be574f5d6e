use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::{Account, NewAccount};
use crate::store::{AccountStore, StoreError};

/// Process-local account store.
/// Ids are assigned from a counter starting at 1, like a database sequence.
#[derive(Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<i64, Account>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let account = account.with_id(id);
        self.accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        match self.accounts.get_mut(&account.id) {
            Some(mut entry) => {
                *entry = account.clone();
                Ok(account)
            }
            None => Err(StoreError::Missing(account.id)),
        }
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.accounts.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.accounts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::Missing(id))
    }

    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}
