//! Image processing pipeline module
//!
//! This module turns a three-plane FITS cube into an annotated JPEG, with
//! separate modules for FITS reading, stretching, composition, captioning,
//! metadata tags and JPEG writing, and the orchestration that chains them.

pub mod annotate;
pub mod common;
pub mod compose;
pub mod config;
pub mod conversions;
pub mod fits;
pub mod jpeg;
pub mod meta;
pub mod observation;
pub mod stretch;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{
    ConversionError,
    Result,
};

pub use fits::{
    CubeReader,
    FitsioReader,
    Header,
    HeaderValue,
    Plane,
    RawCube,
};

pub use stretch::{
    NormalizedPlane,
    normalize_plane,
};

pub use compose::compose_rgb;

pub use annotate::{
    CaptionLayout,
    GlyphRenderer,
    TextRenderer,
};

pub use tags::{
    ExifEncoder,
    TagBlock,
    TagEncoder,
    convert_to_dms,
};

pub use jpeg::{
    JpegWriter,
    StandardJpegWriter,
};

pub use config::{
    ConversionConfig,
    ConversionConfigBuilder,
};

pub use meta::CaptionMeta;
pub use observation::Observation;

pub use conversions::{
    FitsToJpegPipeline,
    output_file_name,
};
