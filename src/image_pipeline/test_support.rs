//! Fixtures shared by the unit tests: minimal FITS files and caption metadata.

use std::path::{Path, PathBuf};

use crate::image_pipeline::fits::header::{Header, HeaderValue};
use crate::image_pipeline::meta::CaptionMeta;

/// Size of one FITS logical record.
pub const BLOCK_SIZE: usize = 2880;

/// Size of one header card.
pub const CARD_SIZE: usize = 80;

/// DejaVu Sans, shipped so text rendering is tested on every machine.
pub fn test_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf")
}

pub fn value_card(key: &str, value: &str) -> String {
    format!("{:<8}= {:>20}", key, value)
}

pub fn string_card(key: &str, value: &str) -> String {
    format!("{:<8}= '{:<8}'", key, value)
}

/// Single-HDU BITPIX=-32 cube written the way cfitsio expects it.
pub struct FitsFixture {
    width: usize,
    height: usize,
    planes: usize,
    samples: Box<dyn Fn(usize, usize, usize) -> f32>,
    cards: Vec<String>,
}

impl FitsFixture {
    pub fn new(width: usize, height: usize, planes: usize) -> Self {
        Self {
            width,
            height,
            planes,
            samples: Box::new(|_, x, y| (x + y) as f32),
            cards: Vec::new(),
        }
    }

    /// Sample generator called as `(plane, x, y)`.
    pub fn with_samples(mut self, f: impl Fn(usize, usize, usize) -> f32 + 'static) -> Self {
        self.samples = Box::new(f);
        self
    }

    pub fn with_card(mut self, card: String) -> Self {
        self.cards.push(card);
        self
    }

    /// Drops every card for `key` added so far.
    pub fn without_card(mut self, key: &str) -> Self {
        self.cards.retain(|card| card.get(..8).map(str::trim_end) != Some(key));
        self
    }

    pub fn with_observation_cards(self) -> Self {
        self.with_card(string_card("OBJECT", "M31"))
            .with_card(value_card("CRVAL1", "10.68470833"))
            .with_card(value_card("CRVAL2", "41.26875"))
            .with_card(string_card("DATE-OBS", "2024-03-15T22:41:07"))
            .with_card(value_card("FOCALLEN", "382.5"))
            .with_card(value_card("EXPTIME", "30."))
            .with_card(value_card("STACKCNT", "10"))
            .with_card(string_card("INSTRUME", "ZWO ASI2600MC Pro"))
            .with_card(value_card("GAIN", "100"))
            .with_card(value_card("SITELAT", "45.5"))
            .with_card(value_card("SITELONG", "-73.25"))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut cards = vec![
            value_card("SIMPLE", "T"),
            value_card("BITPIX", "-32"),
            value_card("NAXIS", "3"),
            value_card("NAXIS1", &self.width.to_string()),
            value_card("NAXIS2", &self.height.to_string()),
            value_card("NAXIS3", &self.planes.to_string()),
        ];
        cards.extend(self.cards.iter().cloned());
        cards.push("END".to_string());

        let mut bytes: Vec<u8> = cards
            .iter()
            .flat_map(|c| format!("{:<width$}", c, width = CARD_SIZE).into_bytes())
            .collect();
        bytes.resize(bytes.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE, b' ');

        let header_len = bytes.len();
        for plane in 0..self.planes {
            for y in 0..self.height {
                for x in 0..self.width {
                    bytes.extend_from_slice(&(self.samples)(plane, x, y).to_be_bytes());
                }
            }
        }
        let data_len = bytes.len() - header_len;
        bytes.resize(header_len + data_len.div_ceil(BLOCK_SIZE) * BLOCK_SIZE, 0);
        bytes
    }

    pub fn write(&self, path: &Path) {
        std::fs::write(path, self.to_bytes()).expect("write FITS fixture");
    }
}

/// Header carrying every keyword the caption and tag block need.
pub fn observation_header() -> Header {
    [
        ("OBJECT", HeaderValue::from("M31")),
        ("CRVAL1", HeaderValue::Float(10.68470833)),
        ("CRVAL2", HeaderValue::Float(41.26875)),
        ("DATE-OBS", HeaderValue::from("2024-03-15T22:41:07")),
        ("FOCALLEN", HeaderValue::Float(382.5)),
        ("EXPTIME", HeaderValue::Float(30.0)),
        ("STACKCNT", HeaderValue::Integer(10)),
        ("INSTRUME", HeaderValue::from("ZWO ASI2600MC Pro")),
        ("GAIN", HeaderValue::Integer(100)),
        ("SITELAT", HeaderValue::Float(45.5)),
        ("SITELONG", HeaderValue::Float(-73.25)),
    ]
    .into_iter()
    .collect()
}

pub fn caption_meta() -> CaptionMeta {
    CaptionMeta {
        author: "Jane".to_string(),
        lens_model: "Askar FRA400".to_string(),
        id_name: "M 31".to_string(),
        location_name: "Mont-Megantic".to_string(),
    }
}
