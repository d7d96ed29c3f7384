//! # PDF Export
//!
//! Turns the invoice area into a one-page A4 landscape PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ExportGateway::export                           │
//! │                                                                         │
//! │  lock editor: take export ticket ──(busy)──► ExportError::InProgress    │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  relabel "Converting...", disable, clone invoiceArea                    │
//! │               │              (lock released)                            │
//! │               ▼                                                         │
//! │  Rasterizer::rasterize(clone)  2246 x 1588 px  ◄── only await point     │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  drop clone ─► JPEG q98 ─► pdf-writer, 297 x 210 mm ─► Downloader       │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  lock editor: restore label, enable, alert on failure, drop ticket      │
//! │               │                                                         │
//! │               ▼                                                         │
//! │  idle                                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The busy flag belongs to the editor, so any number of gateways over one
//! [`EditorState`] still run at most one export at a time. Dropping the
//! ticket, including when an export future is cancelled, returns the editor
//! to idle.

mod pdf;
mod wireframe;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::RgbImage;
use thiserror::Error;
use tracing::{debug, info};

use crate::state::EditorState;
use crate::surface::{Subtree, Surface};

pub use pdf::{assemble_pdf, encode_jpeg, mm_to_pt};
pub use wireframe::WireframeRasterizer;

/// Class added to the offscreen copy of the invoice area.
pub const CLONE_CLASS: &str = "pdf-clone-mode";

// =============================================================================
// Errors
// =============================================================================

/// Export failures.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Another export has not finished yet.
    #[error("An export is already running")]
    InProgress,

    /// The surface has no `invoiceArea` to capture.
    #[error("Nothing to export: invoice area not found")]
    MissingSubtree,

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Download failed: {0}")]
    Download(String),
}

// =============================================================================
// Options
// =============================================================================

/// How the capture is sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub scale: f64,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for RasterOptions {
    /// A4 landscape at 96 dpi, captured at twice the resolution.
    fn default() -> Self {
        RasterOptions {
            scale: 2.0,
            window_width: 1123,
            window_height: 794,
        }
    }
}

impl RasterOptions {
    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let w = (f64::from(self.window_width) * self.scale).round().max(1.0);
        let h = (f64::from(self.window_height) * self.scale).round().max(1.0);
        (w as u32, h as u32)
    }
}

/// Everything the pipeline needs besides its collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub raster: RasterOptions,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            raster: RasterOptions::default(),
            page_width_mm: 297.0,
            page_height_mm: 210.0,
            jpeg_quality: 98,
        }
    }
}

// =============================================================================
// Collaborators
// =============================================================================

/// Paints a detached subtree into pixels.
pub trait Rasterizer {
    fn rasterize(
        &self,
        subtree: &Subtree,
        options: &RasterOptions,
    ) -> impl Future<Output = Result<RgbImage, ExportError>> + Send;
}

/// Delivers the finished file.
pub trait Downloader {
    /// Stores `bytes` under `file_name`; returns where they went.
    fn download(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes exports into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryDownloader { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Downloader for DirectoryDownloader {
    fn download(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ExportError::Download(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)
            .map_err(|e| ExportError::Download(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }
}

// =============================================================================
// Gateway
// =============================================================================

/// Proof that an export is running; clears the editor's busy flag on drop.
#[derive(Debug)]
pub struct ExportTicket(Arc<AtomicBool>);

impl ExportTicket {
    /// Fails with [`ExportError::InProgress`] while another ticket is alive.
    pub fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, ExportError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::InProgress)?;
        Ok(ExportTicket(Arc::clone(flag)))
    }
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// What the editor hands to the pipeline when an export starts.
#[derive(Debug)]
pub struct ExportJob {
    /// Download button text before it was relabelled, if the button exists.
    pub button_label: Option<String>,
    pub file_name: String,
    pub subtree: Option<Subtree>,
    pub ticket: ExportTicket,
}

/// A finished export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReceipt {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: usize,
    pub width_px: u32,
    pub height_px: u32,
}

/// Non-reentrant export pipeline.
pub struct ExportGateway<R, D> {
    rasterizer: R,
    downloader: D,
    options: ExportOptions,
}

impl<R: Rasterizer, D: Downloader> ExportGateway<R, D> {
    pub fn new(rasterizer: R, downloader: D, options: ExportOptions) -> Self {
        ExportGateway {
            rasterizer,
            downloader,
            options,
        }
    }

    /// Runs one export against the editor.
    ///
    /// A call made while the editor is exporting, through this gateway or
    /// any other, returns [`ExportError::InProgress`] without touching the
    /// editor. Any other failure has already been alerted to the user when
    /// this returns.
    pub async fn export<S: Surface>(
        &self,
        state: &EditorState<S>,
    ) -> Result<ExportReceipt, ExportError> {
        let ExportJob {
            button_label,
            file_name,
            subtree,
            ticket,
        } = state.lock().await.begin_export()?;

        let result = self.run(file_name, subtree).await;

        state
            .lock()
            .await
            .finish_export(ticket, button_label.as_deref(), &result);
        result
    }

    async fn run(
        &self,
        file_name: String,
        subtree: Option<Subtree>,
    ) -> Result<ExportReceipt, ExportError> {
        let subtree = subtree.ok_or(ExportError::MissingSubtree)?;
        debug!(rows = subtree.rows.len(), file = %file_name, "Rasterizing invoice");

        let image = self
            .rasterizer
            .rasterize(&subtree, &self.options.raster)
            .await?;
        drop(subtree);

        let (width_px, height_px) = image.dimensions();
        let jpeg = encode_jpeg(&image, self.options.jpeg_quality)?;
        let bytes = assemble_pdf(
            &jpeg,
            width_px,
            height_px,
            self.options.page_width_mm,
            self.options.page_height_mm,
        );

        let path = self.downloader.download(&file_name, &bytes)?;
        info!(path = %path.display(), size = bytes.len(), "PDF exported");

        Ok(ExportReceipt {
            file_name,
            path,
            size_bytes: bytes.len(),
            width_px,
            height_px,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
