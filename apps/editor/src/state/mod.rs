//! # State Module
//!
//! Host-side state: the shared editor and the startup configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐    ┌──────────────────────────────┐   │
//! │  │  EditorState<S>              │    │  AppConfig                   │   │
//! │  │                              │    │                              │   │
//! │  │  Arc<Mutex<Editor<S>>>       │    │  storage: path, quota        │   │
//! │  │  items, fields, labels,      │    │  export: dir, raster, page   │   │
//! │  │  settings, logo, surface     │    │                              │   │
//! │  └──────────────────────────────┘    └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • EditorState: every edit takes the lock exclusively                   │
//! │  • Export releases the lock while it rasterizes                         │
//! │  • AppConfig: read-only after startup                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod editor;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::surface::Surface;

pub use config::{AppConfig, ConfigError, ConfigResult, ExportConfig, StorageConfig};
pub use editor::{ClearOutcome, Editor, EditorEvent};

/// Shared handle to the open editor.
///
/// Uses `Arc<Mutex<Editor>>` because:
/// - `Arc`: command handlers and the export gateway hold it at once
/// - `Mutex`: one edit at a time; the tokio lock may be held across
///   storage awaits
pub struct EditorState<S: Surface> {
    editor: Arc<Mutex<Editor<S>>>,
}

impl<S: Surface> EditorState<S> {
    pub fn new(editor: Editor<S>) -> Self {
        EditorState {
            editor: Arc::new(Mutex::new(editor)),
        }
    }

    /// Locks the editor for exclusive access.
    pub async fn lock(&self) -> MutexGuard<'_, Editor<S>> {
        self.editor.lock().await
    }
}

impl<S: Surface> Clone for EditorState<S> {
    fn clone(&self) -> Self {
        EditorState {
            editor: Arc::clone(&self.editor),
        }
    }
}
