//! Builders for small JPEGs carrying hand-picked EXIF fields.

use std::io::Cursor;
use std::path::PathBuf;

use exif::{Field, In, Rational, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, Rgb, RgbImage};
use tempfile::TempDir;

pub enum FieldSpec {
    Orientation(u16),
    Latitude([(u32, u32); 3], &'static str),
    Longitude([(u32, u32); 3], &'static str),
    DateTimeOriginal(&'static str),
}

fn rationals(parts: &[(u32, u32); 3]) -> Value {
    Value::Rational(
        parts
            .iter()
            .map(|&(num, denom)| Rational { num, denom })
            .collect(),
    )
}

fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

fn to_fields(specs: &[FieldSpec]) -> Vec<Field> {
    let mut fields = Vec::new();
    for spec in specs {
        match spec {
            FieldSpec::Orientation(o) => {
                fields.push(field(Tag::Orientation, Value::Short(vec![*o])))
            }
            FieldSpec::Latitude(dms, r) => {
                fields.push(field(Tag::GPSLatitude, rationals(dms)));
                fields.push(field(Tag::GPSLatitudeRef, ascii(r)));
            }
            FieldSpec::Longitude(dms, r) => {
                fields.push(field(Tag::GPSLongitude, rationals(dms)));
                fields.push(field(Tag::GPSLongitudeRef, ascii(r)));
            }
            FieldSpec::DateTimeOriginal(ts) => {
                fields.push(field(Tag::DateTimeOriginal, ascii(ts)))
            }
        }
    }
    fields
}

pub fn tiff_with_fields(specs: &[FieldSpec]) -> Vec<u8> {
    let fields = to_fields(specs);
    let mut writer = exif::experimental::Writer::new();
    for f in &fields {
        writer.push_field(f);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).expect("write EXIF");
    buf.into_inner()
}

pub fn plain_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 30 % 256) as u8, (y * 30 % 256) as u8, 128])
    });
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 90)
        .encode(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .expect("encode JPEG");
    out
}

/// JPEG with an APP1 Exif segment spliced in right after SOI.
pub fn jpeg_with_fields(width: u32, height: u32, specs: &[FieldSpec]) -> Vec<u8> {
    let jpeg = plain_jpeg(width, height);
    let tiff = tiff_with_fields(specs);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

pub fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write test file");
    path
}
