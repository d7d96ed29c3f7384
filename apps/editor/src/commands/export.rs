//! # Export Command
//!
//! Runs the PDF pipeline and reports where the file went.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::export::{Downloader, ExportGateway, Rasterizer};
use crate::state::EditorState;
use crate::surface::Surface;

/// A finished export.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: usize,
}

/// Exports the invoice area as a one-page PDF.
///
/// ## Errors
/// * `EXPORT_BUSY` - Another export is still running
/// * `EXPORT_ERROR` - The pipeline failed; the user has been alerted
pub async fn export_pdf<S, R, D>(
    gateway: &ExportGateway<R, D>,
    state: &EditorState<S>,
) -> Result<ExportResponse, ApiError>
where
    S: Surface,
    R: Rasterizer,
    D: Downloader,
{
    debug!("export_pdf command");
    let receipt = gateway.export(state).await?;
    Ok(ExportResponse {
        file_name: receipt.file_name,
        path: receipt.path,
        size_bytes: receipt.size_bytes,
    })
}
