use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Account, NewAccount};

mod memory;
mod postgres;

pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("account {0} does not exist")]
    Missing(i64),
}

/// Durable home of account records, keyed by account id.
///
/// Implementations own the records; callers only ever hold copies for the
/// duration of one request.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError>;

    /// Persists a new record and returns it with its assigned id.
    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Overwrites the whole stored record. Fails with `Missing` if the id is unknown.
    async fn save(&self, account: Account) -> Result<Account, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    /// All accounts, ordered by id.
    async fn find_all(&self) -> Result<Vec<Account>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
