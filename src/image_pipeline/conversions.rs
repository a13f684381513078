//! Pipeline conversions module
//!
//! This module contains the orchestration of the FITS to annotated JPEG conversion.

mod fits_to_jpeg;


pub use fits_to_jpeg::{FitsToJpegPipeline, output_file_name};
