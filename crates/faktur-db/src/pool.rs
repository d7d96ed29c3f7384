//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  faktur CLI startup                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings + quota                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.kv()        → KvRepository        (raw get / set / remove)         │
//! │  db.documents() → DocumentRepository  (snapshot + logo)                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! File databases run in WAL mode with NORMAL synchronous. In-memory
//! databases (tests) keep SQLite's default journal.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::document::DocumentRepository;
use crate::repository::kv::KvRepository;

/// Largest value accepted by default, in bytes (5 MiB, like browser storage).
pub const DEFAULT_MAX_VALUE_BYTES: usize = 5 * 1024 * 1024;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/faktur.db")
///     .max_value_bytes(1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 2 (one writer, one spare for diagnostics)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Per-value size limit enforced on writes.
    /// Default: [`DEFAULT_MAX_VALUE_BYTES`]
    pub max_value_bytes: usize,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// The file is created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 2,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            max_value_bytes: DEFAULT_MAX_VALUE_BYTES,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the per-value quota.
    pub fn max_value_bytes(mut self, limit: usize) -> Self {
        self.max_value_bytes = limit;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(MEMORY_PATH),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            max_value_bytes: DEFAULT_MAX_VALUE_BYTES,
        }
    }

    fn is_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    max_value_bytes: usize,
}

impl Database {
    /// Creates a new database connection pool and runs migrations.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError)` - Connection or migration failed
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_options = if config.is_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());
            SqliteConnectOptions::from_str(&connect_url)
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        debug!("Connection options configured");

        // min_connections keeps the in-memory database alive between calls
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            max_value_bytes = config.max_value_bytes,
            "Database pool created"
        );

        let db = Database {
            pool,
            max_value_bytes: config.max_value_bytes,
        };

        migrations::run_migrations(&db.pool).await?;
        Ok(db)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the raw key-value repository.
    pub fn kv(&self) -> KvRepository {
        KvRepository::new(self.pool.clone(), self.max_value_bytes)
    }

    /// Returns the document repository (snapshot + logo).
    ///
    /// ## Example
    /// ```rust,ignore
    /// let logo = db.documents().load_logo().await?;
    /// ```
    pub fn documents(&self) -> DocumentRepository {
        DocumentRepository::new(self.kv())
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(db.kv().get("missing").await.unwrap(), None);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(applied, 1);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/faktur-test.db")
            .max_connections(4)
            .max_value_bytes(1024);

        assert_eq!(config.max_connections, 4);
        assert_eq!(config.max_value_bytes, 1024);
        assert!(!config.is_memory());
        assert!(DbConfig::in_memory().is_memory());
    }
}
