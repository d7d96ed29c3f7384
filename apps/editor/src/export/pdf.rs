//! JPEG encoding and single-page PDF assembly.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

use super::ExportError;

const POINTS_PER_MM: f64 = 72.0 / 25.4;

const IMAGE_NAME: Name<'static> = Name(b"Im1");

pub fn mm_to_pt(mm: f64) -> f32 {
    (mm * POINTS_PER_MM) as f32
}

/// Encodes the capture as a baseline JPEG.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .encode_image(image)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Builds a one-page PDF with the JPEG stretched over the whole page.
pub fn assemble_pdf(
    jpeg: &[u8],
    width_px: u32,
    height_px: u32,
    page_w_mm: f64,
    page_h_mm: f64,
) -> Vec<u8> {
    let page_w = mm_to_pt(page_w_mm);
    let page_h = mm_to_pt(page_h_mm);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(IMAGE_NAME, image_id);
    page.finish();

    let mut image = pdf.image_xobject(image_id, jpeg);
    image.filter(Filter::DctDecode);
    image.width(width_px as i32);
    image.height(height_px as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    image.finish();

    // Image space is the unit square; scale it to the page.
    let mut content = Content::new();
    content.save_state();
    content.transform([page_w, 0.0, 0.0, page_h, 0.0, 0.0]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_landscape_in_points() {
        assert!((mm_to_pt(297.0) - 841.89).abs() < 0.01);
        assert!((mm_to_pt(210.0) - 595.28).abs() < 0.01);
    }

    #[test]
    fn test_jpeg_has_soi_marker() {
        let img = RgbImage::from_pixel(8, 8, image::Rgb([200, 10, 10]));
        let jpeg = encode_jpeg(&img, 98).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_pdf_embeds_image_full_page() {
        let img = RgbImage::from_pixel(20, 14, image::Rgb([255, 255, 255]));
        let jpeg = encode_jpeg(&img, 90).unwrap();
        let bytes = assemble_pdf(&jpeg, 20, 14, 297.0, 210.0);
        let text = String::from_utf8_lossy(&bytes);

        assert!(text.starts_with("%PDF"));
        assert!(text.contains("/DCTDecode"));
        assert!(text.contains("/Im1"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }
}
