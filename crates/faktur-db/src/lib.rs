//! # faktur-db: Storage Layer for Faktur
//!
//! This crate is the key-value storage boundary of the editor. Values live
//! in a local SQLite file accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Faktur Data Flow                                 │
//! │                                                                         │
//! │  Editor mutator (update_item, set_field, ...)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     faktur-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  DocumentRepo  │   │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │  KvRepo        │   │ 001_kv_store │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/faktur/faktur.db                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Key-value and document repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use faktur_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/faktur.db")).await?;
//! db.documents().save(&snapshot).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DEFAULT_MAX_VALUE_BYTES};

pub use repository::document::DocumentRepository;
pub use repository::kv::KvRepository;
