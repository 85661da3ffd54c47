use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::tags::{
    gps_tag_name, GPS_INFO, GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF,
};
use super::value::{ExifValue, TagMap};
use crate::error::ValueError;

/// Key of a GPS sub-tag: its canonical name, or the raw code when the
/// table doesn't know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GpsKey {
    Name(&'static str),
    Code(u16),
}

impl fmt::Display for GpsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsKey::Name(name) => write!(f, "{}", name),
            GpsKey::Code(code) => write!(f, "{}", code),
        }
    }
}

/// GPS sub-directory with resolved tag names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpsBlock {
    entries: BTreeMap<GpsKey, ExifValue>,
}

impl GpsBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: GpsKey, value: ExifValue) -> Option<ExifValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, name: &'static str) -> Option<ExifValue> {
        self.entries.remove(&GpsKey::Name(name))
    }

    pub fn get(&self, name: &'static str) -> Option<&ExifValue> {
        self.entries.get(&GpsKey::Name(name))
    }

    pub fn get_code(&self, code: u16) -> Option<&ExifValue> {
        self.entries.get(&GpsKey::Code(code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First of the four coordinate keys that is absent, if any.
    pub fn missing_coordinate_key(&self) -> Option<&'static str> {
        [GPS_LATITUDE, GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF]
            .into_iter()
            .find(|&key| self.get(key).is_none())
    }
}

impl fmt::Display for GpsBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Isolates the GPSInfo sub-directory and resolves its sub-tag names.
pub fn extract(tags: &TagMap) -> Option<GpsBlock> {
    let raw = tags.find_by_name(GPS_INFO)?.as_directory(GPS_INFO).ok()?;

    let mut block = GpsBlock::new();
    for (&code, value) in raw {
        let key = match gps_tag_name(code) {
            Some(name) => GpsKey::Name(name),
            None => GpsKey::Code(code),
        };
        block.insert(key, value.clone());
    }
    Some(block)
}

/// Signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, ValueError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValueError::OutOfRange {
                axis: "latitude",
                value: lat,
            });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ValueError::OutOfRange {
                axis: "longitude",
                value: lng,
            });
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

fn dms_to_decimal(tag: &str, value: &ExifValue) -> Result<f64, ValueError> {
    let parts = value.as_rational(tag)?;
    match parts.as_slice() {
        [d, m, s] => Ok(d + m / 60.0 + s / 3600.0),
        _ => Err(ValueError::WrongCount {
            tag: tag.to_string(),
            expected: 3,
            found: parts.len(),
        }),
    }
}

/// Decimal coordinate from a GPS block.
///
/// `Ok(None)` when any of latitude, latitude ref, longitude or longitude ref
/// is missing. Latitude is negated for ref `S`, longitude for ref `W`; any
/// other ref keeps the sign.
pub fn convert(gps: &GpsBlock) -> Result<Option<Coordinate>, ValueError> {
    let (Some(lat), Some(lat_ref), Some(lng), Some(lng_ref)) = (
        gps.get(GPS_LATITUDE),
        gps.get(GPS_LATITUDE_REF),
        gps.get(GPS_LONGITUDE),
        gps.get(GPS_LONGITUDE_REF),
    ) else {
        return Ok(None);
    };

    let mut latitude = dms_to_decimal(GPS_LATITUDE, lat)?;
    if lat_ref.as_string(GPS_LATITUDE_REF)? == "S" {
        latitude = -latitude;
    }

    let mut longitude = dms_to_decimal(GPS_LONGITUDE, lng)?;
    if lng_ref.as_string(GPS_LONGITUDE_REF)? == "W" {
        longitude = -longitude;
    }

    Coordinate::new(latitude, longitude).map(Some)
}
