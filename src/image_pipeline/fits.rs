//! FITS cube reading module
//!
//! This module loads the red, green and blue planes and the header of a FITS
//! primary HDU.

mod fitsio_reader;
pub mod header;
mod reader;
pub mod types;

pub use fitsio_reader::FitsioReader;
pub use header::{Header, HeaderValue};
pub use reader::CubeReader;
pub use types::{CHANNEL_NAMES, Plane, RawCube};
