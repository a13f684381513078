//! Header keywords of the primary HDU and typed lookup.
//!
//! The reader fills a [`Header`] with the keywords it reads through cfitsio,
//! which takes care of card layout, quoting and numeric conversion.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Scalar value of a header card.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    String(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::String(s) => f.write_str(s),
            HeaderValue::Integer(v) => write!(f, "{}", v),
            HeaderValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::String(value.to_string())
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Integer(value)
    }
}

impl From<f64> for HeaderValue {
    fn from(value: f64) -> Self {
        HeaderValue::Float(value)
    }
}

/// Ordered keyword/value mapping of one HDU header.
#[derive(Debug, Clone, Default)]
pub struct Header {
    cards: Vec<(String, HeaderValue)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a card. Lookups resolve to the first card with a given keyword.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HeaderValue>) {
        self.cards.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.cards.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.cards.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn require(&self, key: &str) -> Result<&HeaderValue> {
        self.get(key)
            .ok_or_else(|| ConversionError::MissingField(key.to_string()))
    }

    /// Any scalar rendered as text.
    pub fn get_string(&self, key: &str) -> Result<String> {
        Ok(self.require(key)?.to_string())
    }

    pub fn get_f64(&self, key: &str) -> Result<f64> {
        let value = self.require(key)?;
        match value {
            HeaderValue::Integer(v) => Ok(*v as f64),
            HeaderValue::Float(v) => Ok(*v),
            HeaderValue::String(s) => s.trim().parse().map_err(|_| invalid(key, value)),
        }
    }

    /// Integer value; floats are truncated toward zero.
    pub fn get_i64(&self, key: &str) -> Result<i64> {
        let value = self.require(key)?;
        match value {
            HeaderValue::Integer(v) => Ok(*v),
            HeaderValue::Float(v) if v.is_finite() => Ok(v.trunc() as i64),
            HeaderValue::Float(_) => Err(invalid(key, value)),
            HeaderValue::String(s) => s.trim().parse().map_err(|_| invalid(key, value)),
        }
    }

    /// ISO-8601 timestamp such as `DATE-OBS`. A bare date reads as midnight.
    pub fn get_datetime(&self, key: &str) -> Result<NaiveDateTime> {
        let value = self.require(key)?;
        let text = value.to_string();
        parse_iso_datetime(text.trim()).ok_or_else(|| invalid(key, value))
    }
}

impl<K: Into<String>, V: Into<HeaderValue>> FromIterator<(K, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Header::new();
        for (key, value) in iter {
            header.insert(key, value);
        }
        header
    }
}

fn invalid(key: &str, value: &HeaderValue) -> ConversionError {
    ConversionError::InvalidField {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_iso_datetime(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
