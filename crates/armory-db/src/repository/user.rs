//! # User Repository
//!
//! Database operations for accounts.
//!
//! ## Key Operations
//! - Lookup by unique email (login, duplicate-registration check)
//! - Lookup by id (token authentication)
//! - Insert at registration
//!
//! Emails are expected pre-normalized (trimmed, lowercased) by the
//! validation layer; this repository stores and compares them verbatim.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use armory_core::User;

/// Repository for user database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = UserRepository::new(pool);
///
/// let user = repo.insert("hunt@imf.example", &hash).await?;
/// let found = repo.find_by_email("hunt@imf.example").await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: PgPool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new account and returns the stored row.
    ///
    /// ## Errors
    /// Returns `DbError::UniqueViolation` if the email is already taken;
    /// callers translate that into a conflict response.
    pub async fn insert(&self, email: &str, password_hash: &str) -> DbResult<User> {
        let id = Uuid::new_v4().to_string();

        debug!(user_id = %id, "Inserting user");

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Finds an account by its unique email.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Account found
    /// * `Ok(None)` - No account with that email
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Finds an account by id.
    pub async fn find_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw database row; maps 1:1 onto [`User`].
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    async fn test_db() -> Database {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/armory_test".to_string());
        Database::new(DbConfig::new(url)).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_insert_and_find_round_trip() {
        let db = test_db().await;
        let email = format!("user-{}@armory.test", Uuid::new_v4());

        let inserted = db.users().insert(&email, "$argon2id$fake").await.unwrap();
        assert_eq!(inserted.email, email);

        let by_email = db.users().find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(by_email.id, inserted.id);

        let by_id = db.users().find_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, email);

        assert!(db.users().find_by_email("nobody@armory.test").await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_duplicate_email_is_unique_violation() {
        let db = test_db().await;
        let email = format!("dup-{}@armory.test", Uuid::new_v4());

        db.users().insert(&email, "$argon2id$fake").await.unwrap();
        let err = db.users().insert(&email, "$argon2id$other").await.unwrap_err();
        assert!(err.is_unique_violation());
    }
}
