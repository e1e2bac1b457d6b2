//! Chart and report rendering
//!
//! Pure functions from assessment data to RGB images. Drawing happens on
//! in-memory bitmap buffers; PNG encoding is the only byte-level output.

pub mod radar;
pub mod report;

use image::{codecs::png::PngEncoder, ColorType, ImageEncoder, RgbImage};
use plotters::style::RGBColor;

use crate::error::{AppError, AppResult};

// Shared palette of the report template.
pub(crate) const PRIMARY: RGBColor = RGBColor(30, 58, 138);
pub(crate) const SECONDARY: RGBColor = RGBColor(71, 85, 105);
pub(crate) const SUCCESS: RGBColor = RGBColor(16, 185, 129);
pub(crate) const WARNING: RGBColor = RGBColor(245, 158, 11);
pub(crate) const DANGER: RGBColor = RGBColor(239, 68, 68);
pub(crate) const DARK_RED: RGBColor = RGBColor(139, 0, 0);
pub(crate) const DARK: RGBColor = RGBColor(31, 41, 55);
pub(crate) const LIGHT: RGBColor = RGBColor(248, 250, 252);
pub(crate) const BORDER: RGBColor = RGBColor(226, 232, 240);
pub(crate) const TEAL: RGBColor = RGBColor(0, 128, 128);

pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Render(e.to_string())
}

/// Encode an RGB image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> AppResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgb8)
        .map_err(draw_err)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_magic_bytes() {
        let img = RgbImage::from_pixel(4, 4, image::Rgb([255, 255, 255]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
