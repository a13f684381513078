//! Caption annotation module
//!
//! Computes the caption lines from the header and user metadata and draws
//! them onto the composed raster through a [`TextRenderer`].

mod caption;
mod glyph_renderer;
mod renderer;

pub use caption::{CaptionLayout, caption_lines, draw_caption};
pub use glyph_renderer::GlyphRenderer;
pub use renderer::TextRenderer;
