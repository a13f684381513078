use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::fits::types::RawCube;

pub trait CubeReader {
    fn read_cube(&self, path: &Path) -> Result<RawCube>;
}
