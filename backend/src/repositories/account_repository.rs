//! Database repository for account persistence.
//!
//! `AccountStore` is the seam the account service talks to; `AccountRepository`
//! is the SQLite implementation used by the server.

use crate::database::models::{Account, NewAccount};
use crate::errors::StoreError;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Storage operations the account service depends on.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Looks up an account by its exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Inserts a new account.
    ///
    /// Must fail with `StoreError::UniqueViolation` when the username is taken,
    /// even if a prior `find_by_username` returned nothing.
    async fn create(&self, account: NewAccount) -> Result<Account, StoreError>;
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository<'_> {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM accounts WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (id, username, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&account.id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(self.pool)
        .await;

        match result {
            Ok(_) => Ok(account.into()),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => Err(
                StoreError::UniqueViolation(db_error.message().to_string()),
            ),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn test_create_then_find() {
        let pool = test_pool().await;
        let repo = AccountRepository::new(&pool);

        let created = repo
            .create(NewAccount::new("player01", "$2b$04$notarealhash"))
            .await
            .unwrap();

        let found = repo.find_by_username("player01").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.username, "player01");
        assert_eq!(found.password_hash, "$2b$04$notarealhash");
        assert_eq!(found.created_at.timestamp(), created.created_at.timestamp());
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let pool = test_pool().await;
        let repo = AccountRepository::new(&pool);

        assert!(repo.find_by_username("nobody1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let pool = test_pool().await;
        let repo = AccountRepository::new(&pool);
        repo.create(NewAccount::new("Player01", "hash"))
            .await
            .unwrap();

        assert!(repo.find_by_username("player01").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let pool = test_pool().await;
        let repo = AccountRepository::new(&pool);

        repo.create(NewAccount::new("player01", "first"))
            .await
            .unwrap();
        let second = repo.create(NewAccount::new("player01", "second")).await;

        assert!(matches!(second, Err(StoreError::UniqueViolation(_))));
        let stored = repo.find_by_username("player01").await.unwrap().unwrap();
        assert_eq!(stored.password_hash, "first");
    }
}
