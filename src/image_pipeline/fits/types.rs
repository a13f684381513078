//! FITS cube data types

use crate::image_pipeline::fits::header::Header;

/// Names of the three color planes, in cube order.
pub const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// One 2-D plane of samples in FITS row order (first row is the bottom of the image).
#[derive(Debug, Clone)]
pub struct Plane {
    /// Width of the plane in pixels (NAXIS1)
    pub width: usize,
    /// Height of the plane in pixels (NAXIS2)
    pub height: usize,
    /// Row-major samples, may contain NaN or infinities
    pub data: Vec<f64>,
}

/// The first three planes of a FITS primary HDU plus its header.
#[derive(Debug, Clone)]
pub struct RawCube {
    pub red: Plane,
    pub green: Plane,
    pub blue: Plane,
    pub header: Header,
}

impl RawCube {
    /// Planes in red, green, blue order.
    pub fn planes(&self) -> [&Plane; 3] {
        [&self.red, &self.green, &self.blue]
    }
}
