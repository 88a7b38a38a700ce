//! # Refresh Token Repository
//!
//! Database operations for persisted refresh tokens.
//!
//! ## Why Persist Refresh Tokens?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A refresh JWT alone proves it was signed by us.                        │
//! │  The database row proves it is still *welcome* here:                    │
//! │                                                                         │
//! │  refresh request ──► signature valid? ──► row exists + unexpired?      │
//! │                          │ no                  │ no                     │
//! │                          ▼                     ▼                        │
//! │                       rejected              rejected                    │
//! │                                          (revoked by logout,            │
//! │                                           or never issued)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Multiple rows may coexist per user (one per device/session). Logout
//! deletes one specific token; the background sweeper deletes expired ones.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use armory_core::RefreshToken;

/// Repository for refresh token database operations.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Creates a new RefreshTokenRepository.
    pub fn new(pool: PgPool) -> Self {
        RefreshTokenRepository { pool }
    }

    /// Persists a freshly issued refresh token.
    pub async fn insert(
        &self,
        token: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<RefreshToken> {
        let id = Uuid::new_v4().to_string();

        debug!(user_id = %user_id, "Persisting refresh token");

        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            INSERT INTO refresh_tokens (id, token, user_id, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, token, user_id, expires_at
            "#,
        )
        .bind(&id)
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Finds a token row that matches (token, owner) and is unexpired at `now`.
    ///
    /// ## Returns
    /// * `Ok(Some(..))` - Token was issued to this user and is still live
    /// * `Ok(None)` - Unknown, revoked, or expired
    pub async fn find_valid(
        &self,
        token: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> DbResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT id, token, user_id, expires_at
            FROM refresh_tokens
            WHERE token = $1 AND user_id = $2 AND expires_at > $3
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Deletes a token scoped to its owner. Idempotent.
    ///
    /// ## Returns
    /// Number of rows removed (0 when the token was already gone, which
    /// logout treats as success).
    pub async fn delete(&self, token: &str, user_id: &str) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE token = $1 AND user_id = $2
            "#,
        )
        .bind(token)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Deletes every token that expired at or before `now`.
    ///
    /// Called by the background sweeper; expired rows are already useless
    /// for auth, this just keeps the table from growing forever.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_tokens
            WHERE expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            debug!(removed, "Swept expired refresh tokens");
        }
        Ok(removed)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw database row; maps 1:1 onto [`RefreshToken`].
#[derive(Debug, Clone, sqlx::FromRow)]
struct RefreshTokenRow {
    id: String,
    token: String,
    user_id: String,
    expires_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshToken {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshToken {
            id: row.id,
            token: row.token,
            user_id: row.user_id,
            expires_at: row.expires_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;

    async fn test_db() -> Database {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/armory_test".to_string());
        Database::new(DbConfig::new(url)).await.unwrap()
    }

    async fn test_user(db: &Database) -> String {
        let email = format!("tokens-{}@armory.test", Uuid::new_v4());
        db.users().insert(&email, "$argon2id$fake").await.unwrap().id
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_token_validity_and_revocation() {
        let db = test_db().await;
        let user_id = test_user(&db).await;
        let now = Utc::now();
        let token = format!("refresh-{}", Uuid::new_v4());

        db.refresh_tokens()
            .insert(&token, &user_id, now + Duration::days(7))
            .await
            .unwrap();

        // Valid now, invalid after its horizon.
        let found = db
            .refresh_tokens()
            .find_valid(&token, &user_id, now)
            .await
            .unwrap();
        assert!(found.is_some());

        let beyond = db
            .refresh_tokens()
            .find_valid(&token, &user_id, now + Duration::days(8))
            .await
            .unwrap();
        assert!(beyond.is_none());

        // Scoped to the owner: the same token under another user is unknown.
        let other = test_user(&db).await;
        let foreign = db
            .refresh_tokens()
            .find_valid(&token, &other, now)
            .await
            .unwrap();
        assert!(foreign.is_none());

        // Delete is idempotent.
        assert_eq!(db.refresh_tokens().delete(&token, &user_id).await.unwrap(), 1);
        assert_eq!(db.refresh_tokens().delete(&token, &user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_sweeper_removes_only_expired_rows() {
        let db = test_db().await;
        let user_id = test_user(&db).await;
        let now = Utc::now();

        let dead = format!("dead-{}", Uuid::new_v4());
        let live = format!("live-{}", Uuid::new_v4());
        db.refresh_tokens()
            .insert(&dead, &user_id, now - Duration::hours(1))
            .await
            .unwrap();
        db.refresh_tokens()
            .insert(&live, &user_id, now + Duration::days(7))
            .await
            .unwrap();

        let removed = db.refresh_tokens().delete_expired(now).await.unwrap();
        assert!(removed >= 1);

        assert!(db
            .refresh_tokens()
            .find_valid(&live, &user_id, now)
            .await
            .unwrap()
            .is_some());
    }
}
