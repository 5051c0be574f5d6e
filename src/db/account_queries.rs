use sqlx::PgPool;
use crate::models::{Account, NewAccount};

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, user_id, account_type, balance, status
         FROM accounts
         ORDER BY id ASC"
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: i64) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, user_id, account_type, balance, status
         FROM accounts
         WHERE id = $1"
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert(pool: &PgPool, input: NewAccount) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (user_id, account_type, balance, status)
         VALUES ($1, $2, $3, $4)
         RETURNING id, user_id, account_type, balance, status"
    )
    .bind(input.user_id)
    .bind(input.account_type)
    .bind(input.balance)
    .bind(input.status)
    .fetch_one(pool)
    .await
}

// Overwrites every mutable column of an existing row.
pub async fn update(pool: &PgPool, account: Account) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "UPDATE accounts
         SET user_id = $2, account_type = $3, balance = $4, status = $5
         WHERE id = $1
         RETURNING id, user_id, account_type, balance, status"
    )
    .bind(account.id)
    .bind(account.user_id)
    .bind(account.account_type)
    .bind(account.balance)
    .bind(account.status)
    .fetch_optional(pool)
    .await
}

pub async fn exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
