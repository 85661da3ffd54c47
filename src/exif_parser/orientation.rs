use std::path::Path;

use image::{DynamicImage, ImageReader};

use super::reader;
use super::tags::ORIENTATION;
use super::value::TagMap;
use crate::error::SkipReason;

/// Counter-clockwise rotation applied to bring a photo upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Ccw90,
    Ccw180,
    Ccw270,
}

impl Rotation {
    /// Only the pure rotations are honoured: 3, 6 and 8. Mirrored
    /// orientations (2, 4, 5, 7) and anything unknown are left alone.
    pub fn from_orientation(orientation: Option<u32>) -> Self {
        match orientation {
            Some(3) => Rotation::Ccw180,
            Some(6) => Rotation::Ccw270,
            Some(8) => Rotation::Ccw90,
            _ => Rotation::None,
        }
    }

    /// The canvas grows to fit, so quarter turns swap width and height.
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Rotation::None => img,
            Rotation::Ccw90 => img.rotate270(),
            Rotation::Ccw180 => img.rotate180(),
            Rotation::Ccw270 => img.rotate90(),
        }
    }
}

pub fn orientation(tags: &TagMap) -> Option<u32> {
    tags.find_by_name(ORIENTATION)?.as_int(ORIENTATION).ok()
}

pub fn apply_orientation(img: DynamicImage, tags: Option<&TagMap>) -> DynamicImage {
    Rotation::from_orientation(tags.and_then(orientation)).apply(img)
}

fn decode(path: &Path) -> Result<DynamicImage, SkipReason> {
    let decode_error = |source| SkipReason::Decode {
        path: path.display().to_string(),
        source,
    };
    ImageReader::open(path)
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)
}

/// Decodes the image at `path` and rotates it upright using tags already read.
pub fn correct_with(path: &Path, tags: Option<&TagMap>) -> Result<DynamicImage, SkipReason> {
    let img = decode(path)?;
    Ok(apply_orientation(img, tags))
}

/// Decodes the image at `path` and rotates it upright according to its
/// Orientation tag. A missing or unreadable tag leaves the image as decoded.
pub fn correct(path: &Path) -> Result<DynamicImage, SkipReason> {
    let tags = reader::read(path);
    correct_with(path, tags.as_ref())
}
