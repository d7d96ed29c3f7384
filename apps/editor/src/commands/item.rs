//! # Item Commands
//!
//! Row edits. Indexes are zero-based here; the CLI converts from the
//! one-based numbers it shows.
//!
//! ```text
//! ┌────────────┐  add_item   ┌────────────┐  remove_item(i)  ┌────────────┐
//! │  1 row     │────────────►│  n rows    │─────────────────►│  n-1 rows  │
//! │ (minimum)  │◄─ ─ ─ ─ ─ ─ │            │  (n > 1 only)    │            │
//! └────────────┘  remove_item└────────────┘                  └────────────┘
//!                 is a no-op
//! ```

use tracing::debug;

use faktur_core::ItemField;

use super::DocumentResponse;
use crate::error::ApiError;
use crate::state::EditorState;
use crate::surface::Surface;

/// Current document, unchanged.
pub async fn get_document<S: Surface>(state: &EditorState<S>) -> DocumentResponse {
    debug!("get_document command");
    DocumentResponse::from(&*state.lock().await)
}

/// Appends an empty row.
pub async fn add_item<S: Surface>(state: &EditorState<S>) -> Result<DocumentResponse, ApiError> {
    debug!("add_item command");
    let mut editor = state.lock().await;
    editor.add_item().await;
    Ok(DocumentResponse::from(&*editor))
}

/// Removes a row; the last remaining row and unknown rows are kept.
pub async fn remove_item<S: Surface>(
    state: &EditorState<S>,
    index: usize,
) -> Result<DocumentResponse, ApiError> {
    debug!(index, "remove_item command");
    let mut editor = state.lock().await;
    editor.remove_item(index).await;
    Ok(DocumentResponse::from(&*editor))
}

/// Sets one cell of a row.
///
/// ## Arguments
/// * `field` - `name`, `desc`, `qty`, `price`, `disc` or `tax`
/// * `value` - Raw input text; numeric fields keep its leading number
pub async fn update_item<S: Surface>(
    state: &EditorState<S>,
    index: usize,
    field: &str,
    value: &str,
) -> Result<DocumentResponse, ApiError> {
    debug!(index, field, "update_item command");
    let field: ItemField = field.parse()?;

    let mut editor = state.lock().await;
    editor.update_item(index, field, value).await;
    Ok(DocumentResponse::from(&*editor))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::open_state;
    use crate::dialogs::ScriptedDialogs;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_item_commands() {
        let (_db, state) = open_state(ScriptedDialogs::default()).await;

        add_item(&state).await.unwrap();
        update_item(&state, 1, "name", "Hosting").await.unwrap();
        update_item(&state, 1, "qty", "12").await.unwrap();
        let doc = update_item(&state, 1, "price", "50000").await.unwrap();

        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[1].name, "Hosting");
        assert_eq!(doc.items[1].total, "Rp600.000");
        assert_eq!(doc.totals.grand_total, "Rp600.000");
        assert_eq!(doc.totals.total_discount, "(Rp0)");

        let doc = remove_item(&state, 0).await.unwrap();
        assert_eq!(doc.items.len(), 1);
        let doc = remove_item(&state, 0).await.unwrap();
        assert_eq!(doc.items.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_item_field() {
        let (_db, state) = open_state(ScriptedDialogs::default()).await;

        let err = update_item(&state, 0, "colour", "red").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_document(&state).await.items[0].name, "");
    }

    #[tokio::test]
    async fn test_response_serializes_camel_case() {
        let (_db, state) = open_state(ScriptedDialogs::default()).await;
        let doc = get_document(&state).await;

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["totals"]["grandTotal"], "Rp0");
        assert_eq!(json["fields"]["invoiceNo"], "INV/2026/001");
        assert_eq!(json["settings"]["showTax"], true);
        assert_eq!(json["hasLogo"], false);
    }
}
