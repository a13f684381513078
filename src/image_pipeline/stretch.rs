//! Per-channel linear stretch to 8 bits.
//!
//! Every plane is scaled on its own `[min, max]` range. No cross-channel
//! calibration is applied, so each channel uses its full dynamic range.

use tracing::{debug, warn};

use crate::image_pipeline::fits::types::Plane;

/// An 8-bit plane, still in FITS row order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlane {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Stretches `plane` to `0..=255`.
///
/// NaN and infinite samples are replaced with 0 before the range is taken.
/// Scaled values are truncated, not rounded. A constant plane has no range to
/// stretch and maps entirely to 0.
pub fn normalize_plane(plane: &Plane, channel: &str) -> NormalizedPlane {
    let samples: Vec<f64> = plane
        .data
        .iter()
        .map(|&v| if v.is_finite() { v } else { 0.0 })
        .collect();

    let (lo, hi) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let data = if samples.is_empty() {
        Vec::new()
    } else if hi == lo {
        warn!(
            "{} channel is constant ({}), mapping it to 0",
            channel, lo
        );
        vec![0u8; samples.len()]
    } else {
        debug!("Stretching {} channel from [{}, {}]", channel, lo, hi);
        let range = hi - lo;
        samples
            .iter()
            .map(|&v| ((v - lo) / range * 255.0) as u8)
            .collect()
    };

    NormalizedPlane {
        width: plane.width,
        height: plane.height,
        data,
    }
}
