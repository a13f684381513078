//! Format-independent metadata tag types

/// Unsigned rational as used by image metadata formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub const fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }
}

impl From<(u32, u32)> for Rational {
    fn from((num, denom): (u32, u32)) -> Self {
        Self { num, denom }
    }
}

/// Tags the annotated image carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    Model,
    Artist,
    Copyright,
    DateTime,
    ExposureTime,
    FocalLength,
    IsoSpeedRatings,
    ExifVersion,
    DateTimeOriginal,
    LensModel,
    GpsLatitudeRef,
    GpsLatitude,
    GpsLongitudeRef,
    GpsLongitude,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Ascii(String),
    Rational(Vec<Rational>),
    Short(u16),
    Undefined(Vec<u8>),
}

/// Ordered tag-id to value mapping handed to a [`TagEncoder`](super::TagEncoder).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagBlock {
    entries: Vec<(TagId, TagValue)>,
}

impl TagBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `id`, replacing an earlier value in place.
    pub fn insert(&mut self, id: TagId, value: TagValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    pub fn get(&self, id: TagId) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(TagId, TagValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
