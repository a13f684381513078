//! EXIF serialization of a tag block using the kamadak-exif writer.
//!
//! The output is a bare TIFF structure (byte-order mark, IFD0, Exif IFD and
//! GPS IFD) ready to be wrapped in a JPEG APP1 segment.

use std::io::Cursor;

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tags::encoder::TagEncoder;
use crate::image_pipeline::tags::types::{TagBlock, TagId, TagValue};

/// Writes little-endian EXIF.
pub struct ExifEncoder;

impl TagEncoder for ExifEncoder {
    fn encode(&self, block: &TagBlock) -> Result<Vec<u8>> {
        let fields: Vec<Field> = block
            .iter()
            .map(|(id, value)| Field {
                tag: exif_tag(*id),
                ifd_num: In::PRIMARY,
                value: exif_value(value),
            })
            .collect();

        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }

        let mut buffer = Cursor::new(Vec::new());
        writer
            .write(&mut buffer, true)
            .map_err(|e| ConversionError::TagEncodeError(e.to_string()))?;

        let bytes = buffer.into_inner();
        debug!("Encoded {} EXIF fields into {} bytes", fields.len(), bytes.len());
        Ok(bytes)
    }
}

fn exif_tag(id: TagId) -> Tag {
    match id {
        TagId::Model => Tag::Model,
        TagId::Artist => Tag::Artist,
        TagId::Copyright => Tag::Copyright,
        TagId::DateTime => Tag::DateTime,
        TagId::ExposureTime => Tag::ExposureTime,
        TagId::FocalLength => Tag::FocalLength,
        TagId::IsoSpeedRatings => Tag::PhotographicSensitivity,
        TagId::ExifVersion => Tag::ExifVersion,
        TagId::DateTimeOriginal => Tag::DateTimeOriginal,
        TagId::LensModel => Tag::LensModel,
        TagId::GpsLatitudeRef => Tag::GPSLatitudeRef,
        TagId::GpsLatitude => Tag::GPSLatitude,
        TagId::GpsLongitudeRef => Tag::GPSLongitudeRef,
        TagId::GpsLongitude => Tag::GPSLongitude,
    }
}

fn exif_value(value: &TagValue) -> Value {
    match value {
        TagValue::Ascii(text) => Value::Ascii(vec![text.as_bytes().to_vec()]),
        TagValue::Rational(parts) => Value::Rational(
            parts
                .iter()
                .map(|r| exif::Rational {
                    num: r.num,
                    denom: r.denom,
                })
                .collect(),
        ),
        TagValue::Short(v) => Value::Short(vec![*v]),
        TagValue::Undefined(bytes) => Value::Undefined(bytes.clone(), 0),
    }
}
