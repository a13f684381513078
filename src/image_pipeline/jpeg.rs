//! JPEG writing module
//!
//! This module provides JPEG encoding with an embedded EXIF block.

mod standard_jpeg_writer;
mod writer;

pub use standard_jpeg_writer::StandardJpegWriter;
pub use writer::JpegWriter;
