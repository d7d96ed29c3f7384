//! # Document Repository
//!
//! Persists the document snapshot and the logo under their own keys.
//!
//! ## Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  faktur_data  ── DocumentSnapshot as JSON, rewritten on every edit      │
//! │  faktur_logo  ── data URI, written only on upload                       │
//! │                                                                         │
//! │  The two are never merged: a snapshot save never touches the logo.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stored text that is not JSON is logged and reported as absent, so the
//! editor falls back to its compiled-in defaults instead of failing.

use faktur_core::{DocumentSnapshot, DOCUMENT_KEY, LOGO_KEY};
use tracing::{debug, info, warn};

use crate::error::DbResult;
use crate::repository::kv::KvRepository;

/// Repository for the editor's document and logo.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    kv: KvRepository,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository.
    pub fn new(kv: KvRepository) -> Self {
        DocumentRepository { kv }
    }

    /// Writes the whole snapshot.
    pub async fn save(&self, snapshot: &DocumentSnapshot) -> DbResult<()> {
        let json = snapshot.to_json()?;
        self.kv.set(DOCUMENT_KEY, &json).await?;
        debug!(items = snapshot.items.len(), "Document saved");
        Ok(())
    }

    /// Reads the stored snapshot on top of `base`.
    ///
    /// ## Returns
    /// * `Ok(None)` - Nothing stored, or the stored text is not JSON
    /// * `Ok(Some(snapshot))` - `base` with every stored value applied
    pub async fn load(&self, base: DocumentSnapshot) -> DbResult<Option<DocumentSnapshot>> {
        let Some(json) = self.kv.get(DOCUMENT_KEY).await? else {
            debug!("No stored document");
            return Ok(None);
        };

        match DocumentSnapshot::restore(&json, base) {
            Ok(snapshot) => {
                debug!(items = snapshot.items.len(), "Document loaded");
                Ok(Some(snapshot))
            }
            Err(e) => {
                warn!(error = %e, "Stored document is malformed, using defaults");
                Ok(None)
            }
        }
    }

    /// Writes the logo data URI.
    pub async fn save_logo(&self, data_uri: &str) -> DbResult<()> {
        self.kv.set(LOGO_KEY, data_uri).await?;
        debug!(size = data_uri.len(), "Logo saved");
        Ok(())
    }

    /// Reads the logo data URI, if any.
    pub async fn load_logo(&self) -> DbResult<Option<String>> {
        self.kv.get(LOGO_KEY).await
    }

    /// Removes the document and the logo.
    pub async fn clear(&self) -> DbResult<()> {
        self.kv.remove(DOCUMENT_KEY).await?;
        self.kv.remove(LOGO_KEY).await?;
        info!("Stored document and logo cleared");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
