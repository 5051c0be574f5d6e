use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::account_queries;
use crate::models::{Account, NewAccount};
use crate::store::{AccountStore, StoreError};

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, StoreError> {
        Ok(account_queries::fetch_one(&self.pool, id).await?)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        Ok(account_queries::insert(&self.pool, account).await?)
    }

    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        let id = account.id;
        account_queries::update(&self.pool, account)
            .await?
            .ok_or(StoreError::Missing(id))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(account_queries::exists(&self.pool, id).await?)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        match account_queries::delete(&self.pool, id).await? {
            0 => Err(StoreError::Missing(id)),
            _ => Ok(()),
        }
    }

    async fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        Ok(account_queries::fetch_all(&self.pool).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
