//! Metadata tag module
//!
//! Builds the camera / exposure / geolocation tag block and serializes it
//! behind the [`TagEncoder`] trait.

mod builder;
mod encoder;
mod exif_encoder;
pub mod types;

pub use builder::{EXIF_VERSION, build_tag_block, convert_to_dms};
pub use encoder::TagEncoder;
pub use exif_encoder::ExifEncoder;
pub use types::{Rational, TagBlock, TagId, TagValue};
