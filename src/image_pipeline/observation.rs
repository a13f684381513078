//! Observation fields read from the FITS header, shared by the caption and
//! the tag block.

use chrono::NaiveDateTime;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::fits::header::Header;

pub const OBJECT: &str = "OBJECT";
pub const RA: &str = "CRVAL1";
pub const DEC: &str = "CRVAL2";
pub const DATE_OBS: &str = "DATE-OBS";
pub const FOCAL_LENGTH: &str = "FOCALLEN";
pub const EXPOSURE_TIME: &str = "EXPTIME";
pub const STACK_COUNT: &str = "STACKCNT";
pub const INSTRUMENT: &str = "INSTRUME";
pub const GAIN: &str = "GAIN";
pub const SITE_LATITUDE: &str = "SITELAT";
pub const SITE_LONGITUDE: &str = "SITELONG";

/// How a keyword's value is read from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    Text,
    Number,
}

/// Every keyword [`Observation::from_header`] needs, in header order.
pub const KEYWORDS: [(&str, KeywordKind); 11] = [
    (OBJECT, KeywordKind::Text),
    (RA, KeywordKind::Number),
    (DEC, KeywordKind::Number),
    (DATE_OBS, KeywordKind::Text),
    (FOCAL_LENGTH, KeywordKind::Number),
    (EXPOSURE_TIME, KeywordKind::Number),
    (STACK_COUNT, KeywordKind::Number),
    (INSTRUMENT, KeywordKind::Text),
    (GAIN, KeywordKind::Number),
    (SITE_LATITUDE, KeywordKind::Number),
    (SITE_LONGITUDE, KeywordKind::Number),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub object: String,
    /// Right ascension of the reference pixel, degrees
    pub ra: f64,
    /// Declination of the reference pixel, degrees
    pub dec: f64,
    pub date_obs: NaiveDateTime,
    /// Focal length floored to whole millimetres
    pub focal_length_mm: i64,
    /// Integrated exposure: whole seconds per frame times frame count
    pub exposure_seconds: i64,
    pub instrument: String,
    pub gain: i64,
    pub site_latitude: f64,
    pub site_longitude: f64,
}

impl Observation {
    /// Reads every required keyword; the first absent one is reported as
    /// [`ConversionError::MissingField`].
    pub fn from_header(header: &Header) -> Result<Self> {
        let exposure = header.get_i64(EXPOSURE_TIME)?;
        let stack = header.get_i64(STACK_COUNT)?;
        let exposure_seconds =
            exposure
                .checked_mul(stack)
                .ok_or_else(|| ConversionError::InvalidField {
                    key: EXPOSURE_TIME.to_string(),
                    value: format!("{} x {}", exposure, stack),
                })?;

        Ok(Self {
            object: header.get_string(OBJECT)?,
            ra: header.get_f64(RA)?,
            dec: header.get_f64(DEC)?,
            date_obs: header.get_datetime(DATE_OBS)?,
            focal_length_mm: header.get_f64(FOCAL_LENGTH)?.floor() as i64,
            exposure_seconds,
            instrument: header.get_string(INSTRUMENT)?,
            gain: header.get_i64(GAIN)?,
            site_latitude: header.get_f64(SITE_LATITUDE)?,
            site_longitude: header.get_f64(SITE_LONGITUDE)?,
        })
    }

    /// Integrated exposure as `HH:MM:SS`. Hours keep counting past 24.
    pub fn exposure_hms(&self) -> String {
        format_hms(self.exposure_seconds)
    }
}

pub fn format_hms(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
