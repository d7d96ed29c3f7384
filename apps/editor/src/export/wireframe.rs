//! # Wireframe Rasterizer
//!
//! Paints the layout of the invoice area as flat blocks.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ [logo]   ████████ header band ████████████████████████   │
//! │ ▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒  from / to panels  ▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒ │
//! │ ██ item █ desc ██ qty █ price █ disc* █ tax* █ total ██  │
//! │ ░░ one bar per row, hidden columns left out ░░░░░░░░░░░  │
//! │                                   ▒ subtotal           │
//! │                                   ▒ discount*          │
//! │                                   ▒ tax*               │
//! │                                   █ grand total        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no text rendering; the output is a visual check that the
//! capture, hidden columns and the page fit are right.

use std::future::Future;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use tracing::warn;

use faktur_core::Column;

use super::{ExportError, RasterOptions};
use crate::surface::{ids, Display, Subtree};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([33, 37, 41]);
const PANEL: Rgb<u8> = Rgb([233, 236, 239]);
const ROW: Rgb<u8> = Rgb([206, 212, 218]);
const ACCENT: Rgb<u8> = Rgb([13, 110, 253]);

/// Relative widths of Item, Desc, Qty, Price, Disc, Tax, Total.
const COLUMN_WEIGHTS: [u32; 7] = [3, 4, 1, 2, 1, 1, 2];

/// Rasterizer bundled with the CLI.
#[derive(Debug, Clone, Default)]
pub struct WireframeRasterizer;

impl WireframeRasterizer {
    pub fn new() -> Self {
        WireframeRasterizer
    }

    /// Paints synchronously; [`Rasterizer::rasterize`] wraps this.
    ///
    /// [`Rasterizer::rasterize`]: super::Rasterizer::rasterize
    ///
    /// Fails with [`ExportError::Rasterize`] when the canvas is too small
    /// or too far from the page's proportions for the layout to fit.
    pub fn paint(
        &self,
        subtree: &Subtree,
        options: &RasterOptions,
    ) -> Result<RgbImage, ExportError> {
        let (width, height) = options.pixel_size();
        let does_not_fit = || {
            ExportError::Rasterize(format!("layout does not fit a {}x{} canvas", width, height))
        };
        if width < 64 || height < 64 {
            return Err(does_not_fit());
        }

        let margin = width / 24;
        let inner = width - 2 * margin;
        let unit = height / 40;
        let header_h = unit * 5;

        // Header, panels and column headings above the table; totals below.
        let table_top = margin + header_h + unit * 6 + unit + unit / 2;
        let table_bottom = height
            .checked_sub(margin + unit * 9)
            .filter(|bottom| *bottom >= table_top)
            .ok_or_else(does_not_fit)?;

        let mut canvas = RgbImage::from_pixel(width, height, WHITE);

        // Header band with the logo on its left.
        fill(&mut canvas, margin, margin, inner, header_h, PANEL);
        fill(
            &mut canvas,
            width / 2,
            margin + unit,
            (inner / 2).saturating_sub(unit),
            unit * 2,
            INK,
        );
        if let Some(logo) = visible_logo(subtree) {
            let at = margin + unit / 2;
            overlay_logo(&mut canvas, &logo, at, at, header_h - unit);
        }

        // From / To panels.
        let mut y = margin + header_h + unit;
        let half = (inner / 2).saturating_sub(unit / 2);
        fill(&mut canvas, margin, y, half, unit * 4, PANEL);
        fill(&mut canvas, margin + half + unit, y, half, unit * 4, PANEL);
        y += unit * 5;

        // Item table: header, then one bar per row.
        let shown = [
            true,
            true,
            true,
            true,
            column_shown(subtree, Column::Discount),
            column_shown(subtree, Column::Tax),
            true,
        ];
        let spans = column_spans(margin, inner, &shown);
        for &(x, w) in &spans {
            fill(&mut canvas, x, y, w.saturating_sub(unit / 4), unit, INK);
        }
        y += unit + unit / 2;

        let row_h = unit;
        for _ in &subtree.rows {
            if y + row_h > table_bottom {
                break;
            }
            for &(x, w) in &spans {
                fill(&mut canvas, x, y, w.saturating_sub(unit / 4), row_h - unit / 4, ROW);
            }
            y += row_h;
        }

        // Totals block on the right.
        let totals_x = margin + inner / 2 + inner / 8;
        let totals_w = inner - (totals_x - margin);
        let mut ty = table_bottom + unit;
        let summary = [
            (true, PANEL),
            (subtree.is_visible(Column::Discount.summary_row_id()), PANEL),
            (subtree.is_visible(Column::Tax.summary_row_id()), PANEL),
            (subtree.element(ids::GRAND_TOTAL).is_some(), ACCENT),
        ];
        for (visible, colour) in summary {
            if visible {
                fill(&mut canvas, totals_x, ty, totals_w, unit + unit / 2, colour);
                ty += unit * 2;
            }
        }

        Ok(canvas)
    }
}

impl super::Rasterizer for WireframeRasterizer {
    fn rasterize(
        &self,
        subtree: &Subtree,
        options: &RasterOptions,
    ) -> impl Future<Output = Result<RgbImage, ExportError>> + Send {
        let result = self.paint(subtree, options);
        async move { result }
    }
}

/// A row cell is shown unless its column was hidden.
fn column_shown(subtree: &Subtree, column: Column) -> bool {
    subtree.rows.first().map_or(true, |row| {
        let display = match column {
            Column::Discount => row.disc_display,
            Column::Tax => row.tax_display,
        };
        display != Display::None
    })
}

/// Splits `inner` between the shown columns by weight.
fn column_spans(left: u32, inner: u32, shown: &[bool; 7]) -> Vec<(u32, u32)> {
    let total: u32 = COLUMN_WEIGHTS
        .iter()
        .zip(shown)
        .filter(|(_, on)| **on)
        .map(|(w, _)| *w)
        .sum();

    let mut x = left;
    let mut spans = Vec::new();
    for (weight, on) in COLUMN_WEIGHTS.iter().zip(shown) {
        if !on {
            continue;
        }
        let w = inner * weight / total.max(1);
        spans.push((x, w));
        x += w;
    }
    spans
}

fn fill(canvas: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, colour: Rgb<u8>) {
    let x_end = x.saturating_add(w).min(canvas.width());
    let y_end = y.saturating_add(h).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, colour);
        }
    }
}

fn visible_logo(subtree: &Subtree) -> Option<String> {
    if !subtree.is_visible(ids::LOGO_PREVIEW) {
        return None;
    }
    subtree.element(ids::LOGO_PREVIEW)?.src.clone()
}

/// Decodes a `data:<mime>;base64,<payload>` URI and draws it into a
/// square box. A logo that cannot be decoded is skipped.
fn overlay_logo(canvas: &mut RgbImage, data_uri: &str, x: u32, y: u32, size: u32) {
    let decoded = data_uri
        .split_once(";base64,")
        .ok_or_else(|| "not a base64 data URI".to_string())
        .and_then(|(_, payload)| STANDARD.decode(payload).map_err(|e| e.to_string()))
        .and_then(|bytes| image::load_from_memory(&bytes).map_err(|e| e.to_string()));

    match decoded {
        Ok(logo) => {
            let scaled = logo.resize(size, size, FilterType::Nearest).to_rgb8();
            imageops::overlay(canvas, &scaled, i64::from(x), i64::from(y));
        }
        Err(e) => warn!(error = %e, "Logo could not be decoded, leaving it out"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemorySurface, Surface};
    use faktur_core::{CurrencyFormat, ItemList};

    fn template_subtree(hide_tax: bool) -> Subtree {
        let mut s = MemorySurface::from_template();
        if hide_tax {
            s.set_checked("showTax", false);
        }
        crate::render::render_items(&mut s, &ItemList::new(), &CurrencyFormat::idr());
        s.clone_subtree(ids::INVOICE_AREA).unwrap()
    }

    fn small() -> RasterOptions {
        RasterOptions {
            scale: 0.5,
            ..RasterOptions::default()
        }
    }

    #[test]
    fn test_paints_at_requested_size() {
        let img = WireframeRasterizer::new()
            .paint(&template_subtree(false), &small())
            .unwrap();
        assert_eq!(img.dimensions(), (562, 397));
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_hidden_column_narrows_table() {
        let all = column_spans(0, 700, &[true; 7]);
        let mut shown = [true; 7];
        shown[5] = false;
        let fewer = column_spans(0, 700, &shown);
        assert_eq!(all.len(), 7);
        assert_eq!(fewer.len(), 6);

        let subtree = template_subtree(true);
        assert!(!column_shown(&subtree, Column::Tax));
        assert!(column_shown(&subtree, Column::Discount));
    }

    #[test]
    fn test_logo_overlay() {
        let mut png = Vec::new();
        RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(&png));

        let mut s = MemorySurface::from_template();
        crate::render::render_logo(&mut s, Some(&uri));
        let subtree = s.clone_subtree(ids::INVOICE_AREA).unwrap();

        let options = small();
        let img = WireframeRasterizer::new().paint(&subtree, &options).unwrap();
        let margin = img.width() / 24;
        let unit = img.height() / 40;
        let pixel = img.get_pixel(margin + unit, margin + unit);
        assert_eq!(*pixel, Rgb([255, 0, 0]));
    }

    #[test]
    fn test_broken_logo_is_skipped() {
        let mut s = MemorySurface::from_template();
        crate::render::render_logo(&mut s, Some("data:image/png;base64,!!!"));
        let subtree = s.clone_subtree(ids::INVOICE_AREA).unwrap();
        assert!(WireframeRasterizer::new().paint(&subtree, &small()).is_ok());
    }

    #[test]
    fn test_tiny_canvas_is_an_error() {
        let options = RasterOptions {
            scale: 0.01,
            ..RasterOptions::default()
        };
        let err = WireframeRasterizer::new()
            .paint(&template_subtree(false), &options)
            .unwrap_err();
        assert!(matches!(err, ExportError::Rasterize(_)));
    }

    #[test]
    fn test_flat_canvas_is_an_error() {
        let options = RasterOptions {
            scale: 1.0,
            window_width: 2000,
            window_height: 64,
        };
        let err = WireframeRasterizer::new()
            .paint(&template_subtree(false), &options)
            .unwrap_err();
        assert!(matches!(err, ExportError::Rasterize(_)));
    }

    #[test]
    fn test_narrow_tall_canvas_paints() {
        let options = RasterOptions {
            scale: 1.0,
            window_width: 64,
            window_height: 4000,
        };
        let img = WireframeRasterizer::new()
            .paint(&template_subtree(false), &options)
            .unwrap();
        assert_eq!(img.dimensions(), (64, 4000));
    }
}
