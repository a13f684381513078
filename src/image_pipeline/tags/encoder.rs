use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::tags::types::TagBlock;

/// Serializes a [`TagBlock`] into the byte payload embedded in the output image.
pub trait TagEncoder {
    fn encode(&self, block: &TagBlock) -> Result<Vec<u8>>;
}
