use std::collections::BTreeMap;
use std::fmt;

use exif::{Context, In};

use super::tags::{exif_tag_name, EXIF_OFFSET_TAG, GPS_INFO_TAG, INTEROP_OFFSET_TAG};
use crate::error::ValueError;

/// A raw EXIF value. Accessors never coerce between kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ExifValue {
    Byte(Vec<u8>),
    Ascii(Vec<String>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    /// Nested IFD, keyed by raw sub-tag code.
    Directory(BTreeMap<u16, ExifValue>),
    Unknown,
}

impl ExifValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ExifValue::Byte(_) => "byte",
            ExifValue::Ascii(_) => "ascii",
            ExifValue::Short(_) => "short",
            ExifValue::Long(_) => "long",
            ExifValue::Rational(_) => "rational",
            ExifValue::SByte(_) => "sbyte",
            ExifValue::Undefined(_) => "undefined",
            ExifValue::SShort(_) => "sshort",
            ExifValue::SLong(_) => "slong",
            ExifValue::SRational(_) => "srational",
            ExifValue::Float(_) => "float",
            ExifValue::Double(_) => "double",
            ExifValue::Directory(_) => "directory",
            ExifValue::Unknown => "unknown",
        }
    }

    fn unexpected(&self, tag: &str, expected: &'static str) -> ValueError {
        ValueError::UnexpectedType {
            tag: tag.to_string(),
            expected,
            found: self.type_name(),
        }
    }

    /// Rational components as real numbers. Denominators are not checked here,
    /// a zero denominator yields an infinite or NaN component.
    pub fn as_rational(&self, tag: &str) -> Result<Vec<f64>, ValueError> {
        match self {
            ExifValue::Rational(parts) => Ok(parts
                .iter()
                .map(|&(num, denom)| num as f64 / denom as f64)
                .collect()),
            ExifValue::SRational(parts) => Ok(parts
                .iter()
                .map(|&(num, denom)| num as f64 / denom as f64)
                .collect()),
            other => Err(other.unexpected(tag, "rational")),
        }
    }

    pub fn as_string(&self, tag: &str) -> Result<&str, ValueError> {
        match self {
            ExifValue::Ascii(parts) => parts.first().map(String::as_str).ok_or(ValueError::WrongCount {
                tag: tag.to_string(),
                expected: 1,
                found: 0,
            }),
            other => Err(other.unexpected(tag, "ascii")),
        }
    }

    /// First component of an unsigned integer value.
    pub fn as_int(&self, tag: &str) -> Result<u32, ValueError> {
        let first = match self {
            ExifValue::Byte(v) => v.first().map(|&x| x as u32),
            ExifValue::Short(v) => v.first().map(|&x| x as u32),
            ExifValue::Long(v) => v.first().copied(),
            other => return Err(other.unexpected(tag, "integer")),
        };
        first.ok_or(ValueError::WrongCount {
            tag: tag.to_string(),
            expected: 1,
            found: 0,
        })
    }

    pub fn as_directory(&self, tag: &str) -> Result<&BTreeMap<u16, ExifValue>, ValueError> {
        match self {
            ExifValue::Directory(entries) => Ok(entries),
            other => Err(other.unexpected(tag, "directory")),
        }
    }
}

impl From<&exif::Value> for ExifValue {
    fn from(value: &exif::Value) -> Self {
        match value {
            exif::Value::Byte(v) => ExifValue::Byte(v.clone()),
            exif::Value::Ascii(v) => ExifValue::Ascii(
                v.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                    .collect(),
            ),
            exif::Value::Short(v) => ExifValue::Short(v.clone()),
            exif::Value::Long(v) => ExifValue::Long(v.clone()),
            exif::Value::Rational(v) => {
                ExifValue::Rational(v.iter().map(|r| (r.num, r.denom)).collect())
            }
            exif::Value::SByte(v) => ExifValue::SByte(v.clone()),
            exif::Value::Undefined(v, _) => ExifValue::Undefined(v.clone()),
            exif::Value::SShort(v) => ExifValue::SShort(v.clone()),
            exif::Value::SLong(v) => ExifValue::SLong(v.clone()),
            exif::Value::SRational(v) => {
                ExifValue::SRational(v.iter().map(|r| (r.num, r.denom)).collect())
            }
            exif::Value::Float(v) => ExifValue::Float(v.clone()),
            exif::Value::Double(v) => ExifValue::Double(v.clone()),
            _ => ExifValue::Unknown,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    if items.len() == 1 {
        return write!(f, "{}", items[0]);
    }
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}

impl fmt::Display for ExifValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifValue::Byte(v) => write_list(f, v),
            ExifValue::Ascii(v) => {
                let quoted: Vec<String> = v.iter().map(|s| format!("{:?}", s)).collect();
                write_list(f, &quoted)
            }
            ExifValue::Short(v) => write_list(f, v),
            ExifValue::Long(v) => write_list(f, v),
            ExifValue::Rational(v) => {
                let parts: Vec<String> = v.iter().map(|(n, d)| format!("{}/{}", n, d)).collect();
                write_list(f, &parts)
            }
            ExifValue::SByte(v) => write_list(f, v),
            ExifValue::Undefined(v) => write!(f, "<{} bytes>", v.len()),
            ExifValue::SShort(v) => write_list(f, v),
            ExifValue::SLong(v) => write_list(f, v),
            ExifValue::SRational(v) => {
                let parts: Vec<String> = v.iter().map(|(n, d)| format!("{}/{}", n, d)).collect();
                write_list(f, &parts)
            }
            ExifValue::Float(v) => write_list(f, v),
            ExifValue::Double(v) => write_list(f, v),
            ExifValue::Directory(entries) => write!(f, "<directory, {} entries>", entries.len()),
            ExifValue::Unknown => write!(f, "<unknown>"),
        }
    }
}

/// Primary-image EXIF tags keyed by raw tag code. The GPS IFD, when present,
/// sits under `GPSInfo` as an [`ExifValue::Directory`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap {
    entries: BTreeMap<u16, ExifValue>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_exif(exif: &exif::Exif) -> Self {
        let mut entries = BTreeMap::new();
        let mut gps = BTreeMap::new();
        let mut has_gps_pointer = false;

        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            let code = field.tag.number();
            match field.tag.context() {
                Context::Gps => {
                    gps.insert(code, ExifValue::from(&field.value));
                }
                Context::Tiff | Context::Exif => match code {
                    GPS_INFO_TAG => has_gps_pointer = true,
                    EXIF_OFFSET_TAG | INTEROP_OFFSET_TAG => {}
                    _ => {
                        entries.insert(code, ExifValue::from(&field.value));
                    }
                },
                _ => {}
            }
        }

        if has_gps_pointer || !gps.is_empty() {
            entries.insert(GPS_INFO_TAG, ExifValue::Directory(gps));
        }

        Self { entries }
    }

    pub fn insert(&mut self, code: u16, value: ExifValue) -> Option<ExifValue> {
        self.entries.insert(code, value)
    }

    pub fn get(&self, code: u16) -> Option<&ExifValue> {
        self.entries.get(&code)
    }

    /// First entry whose code resolves to `name` in the EXIF table.
    pub fn find_by_name(&self, name: &str) -> Option<&ExifValue> {
        self.entries
            .iter()
            .find(|(&code, _)| exif_tag_name(code) == Some(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &ExifValue)> {
        self.entries.iter().map(|(&code, value)| (code, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
