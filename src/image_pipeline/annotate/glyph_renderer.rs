//! Text rendering with ab_glyph fonts through imageproc.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

use crate::image_pipeline::annotate::renderer::TextRenderer;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::ConversionConfig;

/// Renders solid-color text from a TrueType/OpenType font, without outline or background.
pub struct GlyphRenderer {
    font: FontVec,
    scale: PxScale,
    color: Rgb<u8>,
}

impl GlyphRenderer {
    pub fn from_config(config: &ConversionConfig) -> Result<Self> {
        Self::from_file(&config.font_path, config.font_size, config.text_color)
    }

    pub fn from_file(path: &Path, size: u32, color: [u8; 3]) -> Result<Self> {
        debug!("Loading font {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| {
            ConversionError::FontResource(format!("{}: {}", path.display(), e))
        })?;
        Self::from_bytes(bytes, size, color).map_err(|e| match e {
            ConversionError::FontResource(msg) => {
                ConversionError::FontResource(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, size: u32, color: [u8; 3]) -> Result<Self> {
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| ConversionError::FontResource(e.to_string()))?;
        Ok(Self {
            scale: em_scale(&font, size),
            font,
            color: Rgb(color),
        })
    }
}

/// Scale at which one em of `font` spans `size` pixels.
///
/// `PxScale` sets the ascent-to-descent height instead, which is taller than
/// the em box for most fonts.
fn em_scale(font: &impl Font, size: u32) -> PxScale {
    let height = font.height_unscaled();
    let units_per_em = font.units_per_em().unwrap_or(height);
    PxScale::from(size as f32 * height / units_per_em)
}

impl TextRenderer for GlyphRenderer {
    fn draw_text(&self, image: &mut RgbImage, x: i32, y: i32, text: &str) {
        draw_text_mut(image, self.color, x, y, self.scale, &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::test_support::test_font_path;

    #[test]
    fn test_missing_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = GlyphRenderer::from_file(&dir.path().join("nope.ttf"), 100, [255; 3]);
        assert!(matches!(result, Err(ConversionError::FontResource(msg)) if msg.contains("nope.ttf")));
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = GlyphRenderer::from_bytes(b"definitely not a font".to_vec(), 100, [255; 3]);
        assert!(matches!(result, Err(ConversionError::FontResource(_))));
    }

    #[test]
    fn test_draws_white_pixels() {
        let renderer = GlyphRenderer::from_file(&test_font_path(), 40, [255; 3]).unwrap();
        let mut image = RgbImage::new(200, 60);

        renderer.draw_text(&mut image, 5, 5, "M31");
        assert!(image.pixels().any(|p| p.0.iter().all(|&c| c > 200)));

        // Fully clipped text leaves the raster untouched
        let mut blank = RgbImage::new(50, 50);
        renderer.draw_text(&mut blank, 5, -500, "M31");
        assert!(blank.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_size_is_em_size() {
        let bytes = std::fs::read(test_font_path()).unwrap();
        let font = FontVec::try_from_vec(bytes.clone()).unwrap();
        let units_per_em = font.units_per_em().unwrap();
        let cap = font.outline(font.glyph_id('H')).unwrap().bounds;
        let expected = (cap.max.y - cap.min.y).abs() * 100.0 / units_per_em;

        let renderer = GlyphRenderer::from_bytes(bytes, 100, [255; 3]).unwrap();
        let mut image = RgbImage::new(200, 200);
        renderer.draw_text(&mut image, 10, 10, "H");

        let inked_rows = (0..image.height())
            .filter(|&y| (0..image.width()).any(|x| image.get_pixel(x, y).0[0] > 127))
            .count() as f32;
        assert!(
            (inked_rows - expected).abs() <= 1.5,
            "H is {} px tall, expected {}",
            inked_rows,
            expected
        );
    }
}
