use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username already exists")]
    ConstraintViolation,
    #[error("user row no longer exists")]
    RowMissing,
    #[error("database error")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::ConstraintViolation,
            _ => Self::Database(err),
        }
    }
}

/// Persistence for user records. Every call runs in its own transaction.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;
    async fn update(&self, user: &User) -> Result<(), StoreError>;
    async fn delete(&self, user: &User) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// A transaction that is dropped before commit rolls back and hands its
// connection back to the pool, so `?` on any statement releases the session.
#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, hashed_password, name, gender, birth_date
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, hashed_password, name, gender, birth_date
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, hashed_password, name, gender, birth_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, hashed_password, name, gender, birth_date
            "#,
        )
        .bind(&user.username)
        .bind(&user.hashed_password)
        .bind(&user.name)
        .bind(user.gender)
        .bind(user.birth_date)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, hashed_password, name, gender, birth_date
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let done = sqlx::query(
            r#"
            UPDATE users
               SET name = $2, gender = $3, birth_date = $4
             WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.gender)
        .bind(user.birth_date)
        .execute(&mut *tx)
        .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::RowMissing);
        }
        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let done = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::RowMissing);
        }
        tx.commit().await?;
        Ok(())
    }
}
