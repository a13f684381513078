use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Input cube has {found} plane(s) in its primary HDU, at least 3 are required")]
    InsufficientPlanes { found: usize },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Plane dimension mismatch: {channel} is {found_width}x{found_height}, expected {width}x{height}")]
    DimensionMismatch {
        channel: &'static str,
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("Failed to load metadata: {0}")]
    MetadataError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidField { key: String, value: String },

    #[error("Failed to load font: {0}")]
    FontResource(String),

    #[error("Failed to encode metadata tags: {0}")]
    TagEncodeError(String),

    #[error("Failed to encode JPEG image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
