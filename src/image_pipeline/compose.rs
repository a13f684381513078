//! RGB composition of normalized planes.

use image::{RgbImage, imageops};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::fits::types::CHANNEL_NAMES;
use crate::image_pipeline::stretch::NormalizedPlane;

/// Interleaves `[red, green, blue]` into one raster and flips it top-down.
///
/// FITS stores the bottom row first, photographs store the top row first, so
/// row 0 of the result is the last row of the planes.
pub fn compose_rgb(planes: [&NormalizedPlane; 3]) -> Result<RgbImage> {
    let [red, green, blue] = planes;
    let (width, height) = (red.width, red.height);

    for (plane, channel) in planes.iter().zip(CHANNEL_NAMES) {
        if plane.width != width || plane.height != height {
            return Err(ConversionError::DimensionMismatch {
                channel,
                width,
                height,
                found_width: plane.width,
                found_height: plane.height,
            });
        }
        if plane.data.len() != width * height {
            return Err(ConversionError::InvalidDimensions(width, height));
        }
    }

    let pixel_count = width * height;
    let mut data = Vec::with_capacity(pixel_count * 3);
    for i in 0..pixel_count {
        data.extend_from_slice(&[red.data[i], green.data[i], blue.data[i]]);
    }

    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(ConversionError::InvalidDimensions(width, height)),
    };
    let mut image = RgbImage::from_raw(w, h, data)
        .ok_or(ConversionError::InvalidDimensions(width, height))?;
    imageops::flip_vertical_in_place(&mut image);

    debug!("Composed {}x{} RGB raster", w, h);
    Ok(image)
}
