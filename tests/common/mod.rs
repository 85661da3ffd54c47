#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{Field, In, Rational, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, Rgb, RgbImage};

pub struct Geotag {
    pub lat: [(u32, u32); 3],
    pub lat_ref: &'static str,
    pub lng: [(u32, u32); 3],
    pub lng_ref: &'static str,
}

fn rationals(parts: &[(u32, u32); 3]) -> Value {
    Value::Rational(parts.iter().map(|&(num, denom)| Rational { num, denom }).collect())
}

fn field(tag: Tag, value: Value) -> Field {
    Field { tag, ifd_num: In::PRIMARY, value }
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 7 % 256) as u8, (y * 7 % 256) as u8, 200]));
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, 90)
        .encode(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Writes a JPEG carrying the given geotag and orientation.
pub fn write_photo(dir: &Path, name: &str, geotag: Option<&Geotag>, orientation: Option<u16>) -> PathBuf {
    let jpeg = encode_jpeg(32, 24);
    let mut fields = Vec::new();
    if let Some(g) = geotag {
        fields.push(field(Tag::GPSLatitude, rationals(&g.lat)));
        fields.push(field(Tag::GPSLatitudeRef, Value::Ascii(vec![g.lat_ref.as_bytes().to_vec()])));
        fields.push(field(Tag::GPSLongitude, rationals(&g.lng)));
        fields.push(field(Tag::GPSLongitudeRef, Value::Ascii(vec![g.lng_ref.as_bytes().to_vec()])));
    }
    if let Some(o) = orientation {
        fields.push(field(Tag::Orientation, Value::Short(vec![o])));
    }

    let bytes = if fields.is_empty() {
        jpeg
    } else {
        let mut writer = exif::experimental::Writer::new();
        for f in &fields {
            writer.push_field(f);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, false).unwrap();
        let tiff = tiff.into_inner();

        let mut out = Vec::new();
        out.extend_from_slice(&jpeg[..2]);
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    };

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// The marker array inlined in a generated map document.
pub fn markers_in(html: &str) -> serde_json::Value {
    let start = html.find("const markers = ").expect("markers declaration") + "const markers = ".len();
    let end = start + html[start..].find(";\n").expect("end of markers");
    serde_json::from_str(&html[start..end]).expect("markers JSON")
}
