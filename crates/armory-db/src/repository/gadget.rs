//! # Gadget Repository
//!
//! Database operations for gadgets.
//!
//! ## Ownership Scoping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Every Query Carries the Owner                              │
//! │                                                                         │
//! │  find_by_id_and_owner("g-1", "user-A")                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE id = 'g-1' AND user_id = 'user-A'                               │
//! │       │                                                                 │
//! │       ├── Row exists, owned by A  → Some(gadget)                       │
//! │       ├── Row exists, owned by B  → None   ← indistinguishable         │
//! │       └── Row doesn't exist       → None   ← from absent               │
//! │                                                                         │
//! │  Callers cannot learn whether a foreign id exists.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle Writes
//! `update`, `decommission` and `destroy` are single-row atomic updates
//! with RETURNING; concurrent writers race at the database with
//! last-write-wins. There is deliberately no version column.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use armory_core::{Gadget, GadgetStatus};

/// Repository for gadget database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = GadgetRepository::new(pool);
///
/// let gadget = repo.insert(&user_id, "The Kraken-42").await?;
/// let mine = repo.list_by_owner(&user_id, GadgetStatus::Available).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GadgetRepository {
    pool: PgPool,
}

impl GadgetRepository {
    /// Creates a new GadgetRepository.
    pub fn new(pool: PgPool) -> Self {
        GadgetRepository { pool }
    }

    /// Inserts a new gadget for `user_id`. Status starts as Available.
    pub async fn insert(&self, user_id: &str, name: &str) -> DbResult<Gadget> {
        let id = Uuid::new_v4().to_string();

        debug!(gadget_id = %id, user_id = %user_id, "Inserting gadget");

        let row = sqlx::query_as::<_, GadgetRow>(
            r#"
            INSERT INTO gadgets (id, name, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, status, user_id, created_at, decommissioned_at
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        row.into_gadget()
    }

    /// Finds a gadget by id, scoped to its owner.
    ///
    /// ## Returns
    /// * `Ok(Some(Gadget))` - Gadget exists and belongs to `user_id`
    /// * `Ok(None)` - Absent, or owned by someone else
    pub async fn find_by_id_and_owner(&self, id: &str, user_id: &str) -> DbResult<Option<Gadget>> {
        let row = sqlx::query_as::<_, GadgetRow>(
            r#"
            SELECT id, name, status, user_id, created_at, decommissioned_at
            FROM gadgets
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(GadgetRow::into_gadget).transpose()
    }

    /// Lists an owner's gadgets in the given status, newest first.
    pub async fn list_by_owner(&self, user_id: &str, status: GadgetStatus) -> DbResult<Vec<Gadget>> {
        debug!(user_id = %user_id, status = %status, "Listing gadgets");

        let rows = sqlx::query_as::<_, GadgetRow>(
            r#"
            SELECT id, name, status, user_id, created_at, decommissioned_at
            FROM gadgets
            WHERE user_id = $1 AND status = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(GadgetRow::into_gadget).collect()
    }

    /// Updates name and status in one atomic write, scoped to the owner.
    ///
    /// Transition legality is the service's concern; this method just
    /// persists what it is told.
    ///
    /// ## Errors
    /// `DbError::NotFound` if the id doesn't exist under this owner.
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        name: &str,
        status: GadgetStatus,
    ) -> DbResult<Gadget> {
        let row = sqlx::query_as::<_, GadgetRow>(
            r#"
            UPDATE gadgets
            SET name = $3, status = $4
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, status, user_id, created_at, decommissioned_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("Gadget", id))?.into_gadget()
    }

    /// Marks a gadget Decommissioned and stamps the decommission time.
    ///
    /// The timestamp comes from the database clock so every row agrees on
    /// one notion of time.
    pub async fn decommission(&self, id: &str, user_id: &str) -> DbResult<Gadget> {
        debug!(gadget_id = %id, "Decommissioning gadget");

        let row = sqlx::query_as::<_, GadgetRow>(
            r#"
            UPDATE gadgets
            SET status = 'Decommissioned', decommissioned_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, status, user_id, created_at, decommissioned_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("Gadget", id))?.into_gadget()
    }

    /// Marks a gadget Destroyed. Terminal; nothing writes to the row after.
    pub async fn destroy(&self, id: &str, user_id: &str) -> DbResult<Gadget> {
        debug!(gadget_id = %id, "Destroying gadget");

        let row = sqlx::query_as::<_, GadgetRow>(
            r#"
            UPDATE gadgets
            SET status = 'Destroyed'
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, status, user_id, created_at, decommissioned_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("Gadget", id))?.into_gadget()
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw database row. Status is TEXT in the schema and resolved to the
/// typed enum on the way out; the CHECK constraint makes a parse failure
/// a corruption signal, not a normal condition.
#[derive(Debug, Clone, sqlx::FromRow)]
struct GadgetRow {
    id: String,
    name: String,
    status: String,
    user_id: String,
    created_at: DateTime<Utc>,
    decommissioned_at: Option<DateTime<Utc>>,
}

impl GadgetRow {
    fn into_gadget(self) -> DbResult<Gadget> {
        let status = GadgetStatus::parse(&self.status).ok_or_else(|| {
            DbError::Internal(format!(
                "gadget {} has unrecognized status '{}'",
                self.id, self.status
            ))
        })?;

        Ok(Gadget {
            id: self.id,
            name: self.name,
            status,
            user_id: self.user_id,
            created_at: self.created_at,
            decommissioned_at: self.decommissioned_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/armory_test".to_string());
        Database::new(DbConfig::new(url)).await.unwrap()
    }

    async fn test_user(db: &Database) -> String {
        let email = format!("owner-{}@armory.test", Uuid::new_v4());
        db.users().insert(&email, "$argon2id$fake").await.unwrap().id
    }

    #[test]
    fn test_row_with_corrupt_status_fails_closed() {
        let row = GadgetRow {
            id: "g-1".to_string(),
            name: "The Ghost-5".to_string(),
            status: "Vaporized".to_string(),
            user_id: "u-1".to_string(),
            created_at: Utc::now(),
            decommissioned_at: None,
        };
        let err = row.into_gadget().unwrap_err();
        assert!(matches!(err, DbError::Internal(_)));
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_insert_list_and_lifecycle_writes() {
        let db = test_db().await;
        let owner = test_user(&db).await;

        let gadget = db.gadgets().insert(&owner, "The Kraken-42").await.unwrap();
        assert_eq!(gadget.status, GadgetStatus::Available);
        assert!(gadget.decommissioned_at.is_none());

        let available = db
            .gadgets()
            .list_by_owner(&owner, GadgetStatus::Available)
            .await
            .unwrap();
        assert!(available.iter().any(|g| g.id == gadget.id));

        let renamed = db
            .gadgets()
            .update(&gadget.id, &owner, "The Kraken-43", GadgetStatus::Available)
            .await
            .unwrap();
        assert_eq!(renamed.name, "The Kraken-43");

        let retired = db.gadgets().decommission(&gadget.id, &owner).await.unwrap();
        assert_eq!(retired.status, GadgetStatus::Decommissioned);
        assert!(retired.decommissioned_at.is_some());

        let destroyed = db.gadgets().destroy(&gadget.id, &owner).await.unwrap();
        assert_eq!(destroyed.status, GadgetStatus::Destroyed);
        // Decommission timestamp survives destruction.
        assert!(destroyed.decommissioned_at.is_some());
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance (DATABASE_URL)"]
    async fn test_owner_scoping_hides_foreign_gadgets() {
        let db = test_db().await;
        let owner = test_user(&db).await;
        let stranger = test_user(&db).await;

        let gadget = db.gadgets().insert(&owner, "The Shadow-7").await.unwrap();

        // Reads come back empty for the stranger.
        let seen = db
            .gadgets()
            .find_by_id_and_owner(&gadget.id, &stranger)
            .await
            .unwrap();
        assert!(seen.is_none());

        // Writes fail as not-found, exactly like a nonexistent id.
        let err = db
            .gadgets()
            .decommission(&gadget.id, &stranger)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
