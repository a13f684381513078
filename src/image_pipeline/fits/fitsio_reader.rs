//! FITS cube reader built on the fitsio (cfitsio) bindings.
//!
//! One cfitsio handle serves both the header keywords and the pixels. cfitsio
//! handles every BITPIX type and applies BSCALE/BZERO.

use std::path::Path;

use fitsio::FitsFile;
use fitsio::errors::{Error as FitsioError, FitsError};
use fitsio::hdu::FitsHdu;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::fits::header::{Header, HeaderValue};
use crate::image_pipeline::fits::reader::CubeReader;
use crate::image_pipeline::fits::types::{CHANNEL_NAMES, Plane, RawCube};
use crate::image_pipeline::observation::{KEYWORDS, KeywordKind};

/// cfitsio status for a keyword that is not in the header.
const KEY_NO_EXIST: i32 = 202;

/// cfitsio status for a keyword with a blank value field.
const VALUE_UNDEFINED: i32 = 204;

/// Reads the first three planes of the primary HDU as red, green and blue.
pub struct FitsioReader;

/// Number of planes the primary data unit must provide.
const REQUIRED_PLANES: usize = CHANNEL_NAMES.len();

impl CubeReader for FitsioReader {
    fn read_cube(&self, path: &Path) -> Result<RawCube> {
        debug!("Reading FITS cube {}", path.display());

        let mut fptr = FitsFile::open(path).map_err(|e| read_error(path, e))?;
        let hdu = fptr.primary_hdu().map_err(|e| read_error(path, e))?;

        let (width, height) = cube_dimensions(&hdu, &mut fptr, path)?;
        let header = read_keywords(&hdu, &mut fptr, path)?;

        let plane_len = width * height;
        let pixels: Vec<f64> = hdu
            .read_section(&mut fptr, 0, REQUIRED_PLANES * plane_len)
            .map_err(|e| read_error(path, e))?;

        if pixels.len() < REQUIRED_PLANES * plane_len {
            return Err(ConversionError::InputReadError(format!(
                "{}: expected {} samples, data unit holds {}",
                path.display(),
                REQUIRED_PLANES * plane_len,
                pixels.len()
            )));
        }

        let mut planes = pixels.chunks_exact(plane_len).map(|samples| Plane {
            width,
            height,
            data: samples.to_vec(),
        });

        let (Some(red), Some(green), Some(blue)) = (planes.next(), planes.next(), planes.next())
        else {
            return Err(ConversionError::InsufficientPlanes {
                found: pixels.len() / plane_len,
            });
        };

        debug!("Loaded {}x{} cube with {} header keywords", width, height, header.len());

        Ok(RawCube {
            red,
            green,
            blue,
            header,
        })
    }
}

fn read_error(path: &Path, err: impl std::fmt::Display) -> ConversionError {
    ConversionError::InputReadError(format!("{}: {}", path.display(), err))
}

fn is_absent(err: &FitsioError) -> bool {
    matches!(
        err,
        FitsioError::Fits(FitsError { status, .. }) if *status == KEY_NO_EXIST || *status == VALUE_UNDEFINED
    )
}

/// Reads every observation keyword. Absent or blank ones fail with
/// [`ConversionError::MissingField`], unconvertible numbers with
/// [`ConversionError::InvalidField`].
fn read_keywords(hdu: &FitsHdu, fptr: &mut FitsFile, path: &Path) -> Result<Header> {
    let mut header = Header::new();
    for (key, kind) in KEYWORDS {
        let value = match kind {
            KeywordKind::Text => hdu.read_key::<String>(fptr, key).map(HeaderValue::String),
            KeywordKind::Number => hdu.read_key::<f64>(fptr, key).map(HeaderValue::Float),
        };
        match value {
            Ok(value) => header.insert(key, value),
            Err(e) if is_absent(&e) => return Err(ConversionError::MissingField(key.to_string())),
            Err(FitsioError::Fits(_)) => {
                let raw = hdu.read_key::<String>(fptr, key).unwrap_or_default();
                return Err(ConversionError::InvalidField {
                    key: key.to_string(),
                    value: raw,
                });
            }
            Err(e) => return Err(read_error(path, e)),
        }
    }
    Ok(header)
}

/// Validates NAXIS* against a three-plane cube and returns `(width, height)`.
fn cube_dimensions(hdu: &FitsHdu, fptr: &mut FitsFile, path: &Path) -> Result<(usize, usize)> {
    let mut axis = |key: &str| -> Result<usize> {
        let value = hdu
            .read_key::<i64>(fptr, key)
            .map_err(|e| read_error(path, format!("{}: {}", key, e)))?;
        usize::try_from(value).map_err(|_| ConversionError::InvalidField {
            key: key.to_string(),
            value: value.to_string(),
        })
    };

    let naxis = axis("NAXIS")?;
    if naxis < 3 {
        return Err(ConversionError::InsufficientPlanes {
            found: if naxis == 2 { 1 } else { 0 },
        });
    }

    let width = axis("NAXIS1")?;
    let height = axis("NAXIS2")?;
    let depth = axis("NAXIS3")?;

    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width, height));
    }
    if depth < REQUIRED_PLANES {
        return Err(ConversionError::InsufficientPlanes { found: depth });
    }

    Ok((width, height))
}
