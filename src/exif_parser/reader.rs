use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::value::TagMap;
use crate::error::SkipReason;

/// Reads the primary EXIF tags of the image at `path`.
///
/// Returns `None` when the file can't be opened, isn't a container the EXIF
/// reader understands, or carries no metadata.
pub fn read(path: &Path) -> Option<TagMap> {
    try_read(path).ok()
}

/// Same as [`read`] but keeps the reason for a miss.
pub fn try_read(path: &Path) -> Result<TagMap, SkipReason> {
    let file = File::open(path).map_err(|source| SkipReason::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    let mut buf_reader = BufReader::new(file);
    let mut exif_reader = exif::Reader::new();
    exif_reader.continue_on_error(true); // Tolerate non-standard EXIF structures

    let exif = match exif_reader.read_from_container(&mut buf_reader) {
        Ok(exif) => exif,
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            debug!(
                "⚠️  {} EXIF errors ignored in {}",
                errors.len(),
                path.display()
            );
            exif
        }
        Err(e) => {
            debug!("No EXIF in {}: {}", path.display(), e);
            return Err(SkipReason::NoMetadata {
                path: path.display().to_string(),
            });
        }
    };

    let tags = TagMap::from_exif(&exif);
    if tags.is_empty() {
        return Err(SkipReason::NoMetadata {
            path: path.display().to_string(),
        });
    }
    Ok(tags)
}
