//! # Faktur Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        faktur (CLI)                                     │
//! │                                                                         │
//! │  main.rs ────► starts the tokio runtime                                 │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, storage, one command                    │
//! │                                                                         │
//! │  commands/ ──► add_item, update_item, set_field, export_pdf, ...        │
//! │                                                                         │
//! │  state/ ─────► EditorState, AppConfig                                   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  faktur.db: kv_store (faktur_data, faktur_logo), WAL mode        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Setup lives in lib.rs
    faktur_editor::run().await
}
