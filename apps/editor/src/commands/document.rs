//! # Document Commands
//!
//! Header and footer fields, captions, column toggles, the logo, and
//! starting over.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use faktur_core::{Column, DocumentField, LabelKey};

use super::DocumentResponse;
use crate::error::ApiError;
use crate::state::{ClearOutcome, EditorState};
use crate::surface::Surface;

/// Sets a document field by element id (`clientName`) or kebab name
/// (`client-name`).
pub async fn set_field<S: Surface>(
    state: &EditorState<S>,
    field: &str,
    value: &str,
) -> Result<DocumentResponse, ApiError> {
    debug!(field, "set_field command");
    let field: DocumentField = field.parse()?;

    let mut editor = state.lock().await;
    editor.set_field(field, value).await;
    Ok(DocumentResponse::from(&*editor))
}

/// Sets a caption by storage key (`lGrand`) or element id
/// (`labelGrandTotal`).
pub async fn set_label<S: Surface>(
    state: &EditorState<S>,
    key: &str,
    text: &str,
) -> Result<DocumentResponse, ApiError> {
    debug!(key, "set_label command");
    let key: LabelKey = key.parse()?;

    let mut editor = state.lock().await;
    editor.set_label(key, text).await;
    Ok(DocumentResponse::from(&*editor))
}

/// Shows or hides the `disc` or `tax` column.
pub async fn set_column<S: Surface>(
    state: &EditorState<S>,
    column: &str,
    visible: bool,
) -> Result<DocumentResponse, ApiError> {
    debug!(column, visible, "set_column command");
    let column: Column = column.parse()?;

    let mut editor = state.lock().await;
    editor.set_column(column, visible).await;
    Ok(DocumentResponse::from(&*editor))
}

/// Reads an image file and makes it the logo.
///
/// ## Errors
/// * `IO_ERROR` - The file cannot be read
/// * `VALIDATION_ERROR` - The file is not a recognised image format
pub async fn upload_logo<S: Surface>(
    state: &EditorState<S>,
    path: &Path,
) -> Result<DocumentResponse, ApiError> {
    debug!(path = %path.display(), "upload_logo command");
    let bytes = tokio::fs::read(path).await?;
    let format = image::guess_format(&bytes).map_err(|_| {
        ApiError::validation(format!("{} is not a recognised image", path.display()))
    })?;

    let mut editor = state.lock().await;
    editor.upload_logo(&bytes, format.to_mime_type()).await;
    info!(size = bytes.len(), mime = format.to_mime_type(), "Logo uploaded");
    Ok(DocumentResponse::from(&*editor))
}

/// Outcome of a clear request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResponse {
    pub cleared: bool,
    pub document: DocumentResponse,
}

/// Wipes the stored document after the user confirms.
///
/// ## Errors
/// * `STORAGE_ERROR` - The stored document could not be deleted; it is
///   still there and still open
pub async fn clear_document<S: Surface>(state: &EditorState<S>) -> Result<ClearResponse, ApiError> {
    debug!("clear_document command");
    let mut editor = state.lock().await;
    let outcome = editor.clear().await?;
    Ok(ClearResponse {
        cleared: outcome == ClearOutcome::Cleared,
        document: DocumentResponse::from(&*editor),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
