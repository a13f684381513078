//! User-supplied caption metadata loaded from JSON.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Identity fields that do not come from the FITS header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionMeta {
    pub author: String,
    #[serde(rename = "lensName")]
    pub lens_model: String,
    pub id_name: String,
    pub location_name: String,
}

impl CaptionMeta {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            let message = e.to_string();
            match e.classify() {
                serde_json::error::Category::Data if message.starts_with("missing field") => {
                    ConversionError::MissingField(message)
                }
                _ => ConversionError::MetadataError(message),
            }
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading caption metadata from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}
