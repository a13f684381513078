use std::io::Write;

use image::RgbImage;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::config::ConversionConfig;

pub trait JpegWriter {
    /// Encodes `image` as JPEG, embedding `exif` (a TIFF-structured payload) when given.
    fn write_jpeg(
        &self,
        image: &RgbImage,
        exif: Option<&[u8]>,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
