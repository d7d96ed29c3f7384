//! # Repository Module
//!
//! Storage repositories for Faktur.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Editor controller                                                      │
//! │       │                                                                 │
//! │       │  db.documents().save(&snapshot)                                 │
//! │       ▼                                                                 │
//! │  DocumentRepository                                                     │
//! │  ├── save / load          (faktur_data)                                 │
//! │  ├── save_logo / load_logo (faktur_logo)                                │
//! │  └── clear                                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KvRepository  (get / set / remove, quota)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite kv_store                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod document;
pub mod kv;
