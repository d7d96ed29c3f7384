//! # Key-Value Repository
//!
//! The raw storage boundary: string keys to string values.
//!
//! ## Semantics
//! ```text
//! get(k)        → None when the key was never set (or was removed)
//!               → Some("") when an empty string was stored
//! set(k, v)     → upsert, rejected with QuotaExceeded above the limit
//! remove(k)     → idempotent
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Repository over the `kv_store` table.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
    max_value_bytes: usize,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool, max_value_bytes: usize) -> Self {
        KvRepository {
            pool,
            max_value_bytes,
        }
    }

    /// Reads a value.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "kv get");
        Ok(value)
    }

    /// Writes a value, replacing any previous one.
    ///
    /// ## Errors
    /// `DbError::QuotaExceeded` when `value` is larger than the configured
    /// limit. The stored value is left untouched in that case.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        if value.len() > self.max_value_bytes {
            warn!(
                key = %key,
                size = value.len(),
                limit = self.max_value_bytes,
                "Rejecting write above storage quota"
            );
            return Err(DbError::quota(key, value.len(), self.max_value_bytes));
        }

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(key = %key, size = value.len(), "kv set");
        Ok(())
    }

    /// Deletes a key. Removing an absent key is not an error.
    pub async fn remove(&self, key: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "kv remove");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let db = setup().await;
        assert_eq!(db.kv().get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_overwrite() {
        let db = setup().await;
        let kv = db.kv();

        kv.set("k", "one").await.unwrap();
        kv.set("k", "two").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_empty_string_is_not_absent() {
        let db = setup().await;
        let kv = db.kv();

        kv.set("k", "").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let db = setup().await;
        let kv = db.kv();

        kv.set("k", "v").await.unwrap();
        kv.remove("k").await.unwrap();
        kv.remove("k").await.unwrap();
        assert_eq!(kv.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quota_rejects_and_keeps_previous_value() {
        let db = Database::new(DbConfig::in_memory().max_value_bytes(8))
            .await
            .unwrap();
        let kv = db.kv();

        kv.set("k", "small").await.unwrap();
        let err = kv.set("k", "far too large").await.unwrap_err();

        assert!(matches!(err, DbError::QuotaExceeded { size: 13, limit: 8, .. }));
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("small"));
    }
}
