use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::meta::CaptionMeta;
use crate::image_pipeline::observation::{EXPOSURE_TIME, FOCAL_LENGTH, GAIN, Observation};
use crate::image_pipeline::tags::types::{Rational, TagBlock, TagId, TagValue};

/// Version marker written as ExifVersion.
pub const EXIF_VERSION: &[u8; 4] = b"0231";

/// Denominator of the seconds component of a DMS triple.
const DMS_SECONDS_DENOM: u32 = 10_000;

const TAG_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Converts decimal degrees to a degree/minute/second rational triple.
///
/// Works on the magnitude; the hemisphere goes into the matching `*Ref` tag.
/// Each component is truncated, seconds keep four decimals through the
/// `/10000` denominator.
pub fn convert_to_dms(coord: f64) -> [Rational; 3] {
    let coord = coord.abs();
    let degrees = coord.trunc();
    let minutes = ((coord - degrees) * 60.0).trunc();
    let seconds = (((coord - degrees) * 60.0 - minutes) * 60.0 * DMS_SECONDS_DENOM as f64).trunc();
    [
        Rational::new(degrees as u32, 1),
        Rational::new(minutes as u32, 1),
        Rational::new(seconds as u32, DMS_SECONDS_DENOM),
    ]
}

pub fn build_tag_block(observation: &Observation, meta: &CaptionMeta) -> Result<TagBlock> {
    let timestamp = observation.date_obs.format(TAG_DATETIME_FORMAT).to_string();

    let exposure = u32::try_from(observation.exposure_seconds)
        .map_err(|_| invalid(EXPOSURE_TIME, observation.exposure_seconds))?;
    let focal_length = u32::try_from(observation.focal_length_mm)
        .map_err(|_| invalid(FOCAL_LENGTH, observation.focal_length_mm))?;
    let iso = u16::try_from(observation.gain)
        .map_err(|_| invalid(GAIN, observation.gain))?;

    let latitude_ref = if observation.site_latitude < 0.0 { "S" } else { "N" };
    let longitude_ref = if observation.site_longitude < 0.0 { "W" } else { "E" };

    let mut block = TagBlock::new();
    block.insert(TagId::Model, TagValue::Ascii(observation.instrument.clone()));
    block.insert(TagId::Artist, TagValue::Ascii(meta.author.clone()));
    block.insert(TagId::Copyright, TagValue::Ascii(meta.author.clone()));
    block.insert(TagId::DateTime, TagValue::Ascii(timestamp.clone()));
    block.insert(TagId::ExposureTime, TagValue::Rational(vec![Rational::new(exposure, 1)]));
    block.insert(TagId::FocalLength, TagValue::Rational(vec![Rational::new(focal_length, 1)]));
    block.insert(TagId::IsoSpeedRatings, TagValue::Short(iso));
    block.insert(TagId::ExifVersion, TagValue::Undefined(EXIF_VERSION.to_vec()));
    block.insert(TagId::DateTimeOriginal, TagValue::Ascii(timestamp));
    block.insert(TagId::LensModel, TagValue::Ascii(meta.lens_model.clone()));
    block.insert(TagId::GpsLatitudeRef, TagValue::Ascii(latitude_ref.to_string()));
    block.insert(
        TagId::GpsLatitude,
        TagValue::Rational(convert_to_dms(observation.site_latitude).to_vec()),
    );
    block.insert(TagId::GpsLongitudeRef, TagValue::Ascii(longitude_ref.to_string()));
    block.insert(
        TagId::GpsLongitude,
        TagValue::Rational(convert_to_dms(observation.site_longitude).to_vec()),
    );

    debug!("Built tag block with {} tags", block.len());
    Ok(block)
}

fn invalid(key: &str, value: i64) -> ConversionError {
    ConversionError::InvalidField {
        key: key.to_string(),
        value: value.to_string(),
    }
}
