//! # Storage Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)      Snapshot encode (CoreError)           │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Editor: logged, never fatal                                           │
//! │  CLI:    ApiError ← Serialized for the terminal                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Storage operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// A value is larger than the configured per-value quota.
    ///
    /// ## When This Occurs
    /// - Uploading a very large logo
    /// - `FAKTUR_STORAGE_QUOTA` set unusually low
    ///
    /// Nothing is written; the previous value stays in place.
    #[error("Storage quota exceeded for '{key}': {size} bytes (limit {limit})")]
    QuotaExceeded {
        key: String,
        size: usize,
        limit: usize,
    },

    /// A value could not be encoded for storage.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - Migration version conflict
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a QuotaExceeded error.
    pub fn quota(key: impl Into<String>, size: usize, limit: usize) -> Self {
        DbError::QuotaExceeded {
            key: key.into(),
            size,
            limit,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<faktur_core::CoreError> for DbError {
    fn from(err: faktur_core::CoreError) -> Self {
        DbError::Serialization(err.to_string())
    }
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message() {
        let err = DbError::quota("faktur_logo", 6_000_000, 5_242_880);
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded for 'faktur_logo': 6000000 bytes (limit 5242880)"
        );
    }

    #[test]
    fn test_pool_closed_maps_to_connection_failed() {
        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }
}
