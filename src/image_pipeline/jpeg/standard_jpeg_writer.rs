use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageEncoder, RgbImage};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::config::ConversionConfig;
use crate::image_pipeline::jpeg::writer::JpegWriter;

/// Largest payload that fits one APP1 segment next to its length field and `Exif\0\0` header.
const MAX_EXIF_PAYLOAD: usize = u16::MAX as usize - 2 - 6;

pub struct StandardJpegWriter;

impl JpegWriter for StandardJpegWriter {
    fn write_jpeg(
        &self,
        image: &RgbImage,
        exif: Option<&[u8]>,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!(
            "Encoding JPEG image: {}x{} at quality {}",
            image.width(),
            image.height(),
            config.jpeg_quality
        );

        let mut buffer = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality);

        if let Some(payload) = exif {
            if payload.len() > MAX_EXIF_PAYLOAD {
                return Err(ConversionError::TagEncodeError(format!(
                    "EXIF payload of {} bytes does not fit in one APP1 segment",
                    payload.len()
                )));
            }
            // Written as APP1 right after the JFIF APP0 segment
            encoder
                .set_exif_metadata(payload.to_vec())
                .map_err(|e| ConversionError::TagEncodeError(e.to_string()))?;
        }

        encoder
            .encode_image(image)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("JPEG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x * 8) as u8, (y * 8) as u8, 128]))
    }

    #[test]
    fn test_plain_jpeg_decodes() {
        let mut output = Vec::new();
        StandardJpegWriter
            .write_jpeg(&gradient(16, 8), None, &mut output, &ConversionConfig::default())
            .unwrap();

        assert!(output.starts_with(&[0xFF, 0xD8]));
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    /// Marker and declared segment length of the first `count` segments.
    fn leading_segments(jpeg: &[u8], count: usize) -> Vec<(u8, usize)> {
        let mut segments = Vec::new();
        let mut pos = 2;
        while segments.len() < count {
            assert_eq!(jpeg[pos], 0xFF);
            let len = u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]) as usize;
            segments.push((jpeg[pos + 1], len));
            pos += 2 + len;
        }
        segments
    }

    #[test]
    fn test_exif_segment_follows_jfif_header() {
        let payload = b"II*\0\x08\0\0\0\0\0\0\0\0\0".to_vec();
        let mut output = Vec::new();
        StandardJpegWriter
            .write_jpeg(&gradient(8, 8), Some(&payload), &mut output, &ConversionConfig::default())
            .unwrap();

        assert_eq!(&output[0..2], &[0xFF, 0xD8]);
        let segments = leading_segments(&output, 2);
        assert_eq!(segments[0].0, 0xE0);
        assert_eq!(segments[1], (0xE1, 2 + 6 + payload.len()));

        let app1 = 2 + 2 + segments[0].1;
        assert_eq!(&output[app1 + 4..app1 + 10], b"Exif\0\0");
        assert_eq!(&output[app1 + 10..app1 + 10 + payload.len()], payload.as_slice());
    }

    #[test]
    fn test_no_app1_without_exif() {
        let mut output = Vec::new();
        StandardJpegWriter
            .write_jpeg(&gradient(8, 8), None, &mut output, &ConversionConfig::default())
            .unwrap();

        let segments = leading_segments(&output, 2);
        assert_eq!(segments[0].0, 0xE0);
        assert_ne!(segments[1].0, 0xE1);
    }

    #[test]
    fn test_exif_readable_from_container() {
        use crate::image_pipeline::tags::{TagBlock, TagEncoder, TagId, TagValue, ExifEncoder};

        let mut block = TagBlock::new();
        block.insert(TagId::Model, TagValue::Ascii("ASI533MC".into()));
        let payload = ExifEncoder.encode(&block).unwrap();

        let mut output = Vec::new();
        StandardJpegWriter
            .write_jpeg(&gradient(8, 8), Some(&payload), &mut output, &ConversionConfig::default())
            .unwrap();

        let exif = exif::Reader::new()
            .read_from_container(&mut Cursor::new(&output))
            .unwrap();
        let model = exif.get_field(exif::Tag::Model, exif::In::PRIMARY).unwrap();
        assert!(matches!(&model.value, exif::Value::Ascii(v) if v[0] == b"ASI533MC"));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let payload = vec![0u8; 70_000];
        let mut output = Vec::new();
        let result = StandardJpegWriter.write_jpeg(
            &gradient(8, 8),
            Some(&payload),
            &mut output,
            &ConversionConfig::default(),
        );
        assert!(matches!(result, Err(ConversionError::TagEncodeError(_))));
        assert!(output.is_empty());
    }
}
