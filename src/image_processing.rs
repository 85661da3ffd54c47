use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::NaiveDateTime;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType};
use std::path::Path;

use crate::constants::*;
use crate::exif_parser::tags::DATE_TIME_ORIGINAL;
use crate::exif_parser::TagMap;

/// Popup body for one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupPayload {
    pub filename: String,
    pub timestamp: Option<String>,
    pub image_base64: String,
    pub html: String,
}

/// First DateTimeOriginal entry, made readable when it is a regular EXIF
/// datetime (`YYYY:MM:DD HH:MM:SS`); otherwise the raw text.
pub fn capture_timestamp(tags: &TagMap) -> Option<String> {
    let raw = tags
        .find_by_name(DATE_TIME_ORIGINAL)?
        .as_string(DATE_TIME_ORIGINAL)
        .ok()?
        .trim();
    if raw.is_empty() {
        return None;
    }

    match NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S") {
        Ok(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        Err(_) => Some(raw.to_string()),
    }
}

/// Final path segment, used for popup text and marker tooltips.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resizes to the fixed popup canvas and encodes as JPEG.
///
/// Lanczos3 matters here: cheaper filters gave popups that rendered blank.
pub fn create_popup_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let scaled = img.resize_exact(
        POPUP_THUMBNAIL_SIZE,
        POPUP_THUMBNAIL_SIZE,
        FilterType::Lanczos3,
    );
    let rgb_image = scaled.to_rgb8();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, quality)
        .encode(
            rgb_image.as_raw(),
            rgb_image.width(),
            rgb_image.height(),
            ExtendedColorType::Rgb8,
        )
        .with_context(|| "Failed to encode popup JPEG")?;

    Ok(jpeg_data)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds the popup payload: inline thumbnail, file name and capture time.
pub fn encode(img: &DynamicImage, path: &Path, timestamp: Option<&str>) -> Result<PopupPayload> {
    encode_with_quality(img, path, timestamp, DEFAULT_THUMBNAIL_QUALITY)
}

pub fn encode_with_quality(
    img: &DynamicImage,
    path: &Path,
    timestamp: Option<&str>,
    quality: u8,
) -> Result<PopupPayload> {
    let jpeg_data = create_popup_jpeg(img, quality)
        .with_context(|| format!("Failed to create popup for {:?}", path))?;
    let image_base64 = STANDARD.encode(&jpeg_data);
    let filename = file_label(path);

    let html = format!(
        r#"<img src="data:image/jpeg;base64,{}" width="{}px"><h5>File: {}</h5><h5>Taken: {}</h5>"#,
        image_base64,
        POPUP_THUMBNAIL_SIZE,
        escape_html(&filename),
        escape_html(timestamp.unwrap_or(UNKNOWN_TIMESTAMP)),
    );

    Ok(PopupPayload {
        filename,
        timestamp: timestamp.map(str::to_string),
        image_base64,
        html,
    })
}
