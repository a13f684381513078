//! Conversion configuration types

use std::path::PathBuf;

#[cfg(windows)]
pub const DEFAULT_FONT_PATH: &str = "C:/Windows/Fonts/arial.ttf";
#[cfg(target_os = "macos")]
pub const DEFAULT_FONT_PATH: &str = "/System/Library/Fonts/Supplemental/Arial.ttf";
#[cfg(all(unix, not(target_os = "macos")))]
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";
#[cfg(not(any(unix, windows)))]
pub const DEFAULT_FONT_PATH: &str = "DejaVuSans.ttf";

/// Configuration for FITS to JPEG conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// TrueType/OpenType font used for the caption
    pub font_path: PathBuf,
    /// Caption font size in pixels, also the caption line height
    pub font_size: u32,
    /// Distance of the caption block from the left and bottom edges
    pub padding: u32,
    /// Vertical gap between caption lines
    pub line_gap: u32,
    /// Caption text color
    pub text_color: [u8; 3],
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Directory the annotated image is written to
    pub output_dir: PathBuf,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
            font_size: 100,
            padding: 20,
            line_gap: 20,
            text_color: [255, 255, 255],
            jpeg_quality: 100,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    font_path: Option<PathBuf>,
    font_size: Option<u32>,
    padding: Option<u32>,
    line_gap: Option<u32>,
    text_color: Option<[u8; 3]>,
    jpeg_quality: Option<u8>,
    output_dir: Option<PathBuf>,
}

impl ConversionConfigBuilder {
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn line_gap(mut self, gap: u32) -> Self {
        self.line_gap = Some(gap);
        self
    }

    pub fn text_color(mut self, color: [u8; 3]) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Clamped to 1-100.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality.clamp(1, 100));
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            font_path: self.font_path.unwrap_or(default.font_path),
            font_size: self.font_size.unwrap_or(default.font_size),
            padding: self.padding.unwrap_or(default.padding),
            line_gap: self.line_gap.unwrap_or(default.line_gap),
            text_color: self.text_color.unwrap_or(default.text_color),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
        }
    }
}
