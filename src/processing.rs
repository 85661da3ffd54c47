use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::SkipReason;
use crate::exif_parser::{self, Coordinate};
use crate::folder_picker::{collect_images, FolderSelector};
use crate::image_processing::{capture_timestamp, encode_with_quality};
use crate::map::{MapAssembler, MapView};

/// Everything a run needs besides the folder.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub view: MapView,
    pub output: PathBuf,
    pub thumbnail_quality: u8,
}

/// Per-run statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub folder: PathBuf,
    pub total: usize,
    pub marked: usize,
    /// Skip count per [`SkipReason::kind`].
    pub skipped: BTreeMap<&'static str, usize>,
}

impl RunSummary {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    fn log(&self) {
        info!("📊 Processing summary:");
        info!("   🔍 Files checked: {}", self.total);
        info!("   🗺️  With GPS (marked): {}", self.marked);
        for (kind, count) in &self.skipped {
            info!("   ❌ Skipped ({}): {}", kind, count);
        }
    }
}

/// Runs one file through read → GPS → convert → upright → popup and, on
/// success, adds its marker and heat point to `map`.
pub fn process_file(
    path: &Path,
    map: &mut MapAssembler,
    thumbnail_quality: u8,
) -> Result<Coordinate, SkipReason> {
    let path_str = || path.display().to_string();

    let tags = exif_parser::try_read(path)?;

    let gps = exif_parser::extract(&tags).ok_or_else(|| SkipReason::NoGpsBlock { path: path_str() })?;
    info!("📍 GPS info for {}: {}", path.display(), gps);

    let coordinate = match exif_parser::convert(&gps) {
        Ok(Some(coordinate)) => coordinate,
        Ok(None) => {
            return Err(SkipReason::IncompleteGps {
                path: path_str(),
                missing: gps.missing_coordinate_key().unwrap_or("coordinate"),
            })
        }
        Err(source) => {
            return Err(SkipReason::BadValue {
                path: path_str(),
                source,
            })
        }
    };

    let img = exif_parser::correct_with(path, Some(&tags))?;
    let timestamp = capture_timestamp(&tags);
    let payload = encode_with_quality(&img, path, timestamp.as_deref(), thumbnail_quality)
        .map_err(|e| SkipReason::Thumbnail {
            path: path_str(),
            message: format!("{:#}", e),
        })?;

    map.add_heat_point(coordinate);
    map.add_marker(coordinate, &payload, &payload.filename);
    Ok(coordinate)
}

/// Processes `paths` in order. A failing file is logged and skipped.
pub fn process_batch(paths: &[PathBuf], map: &mut MapAssembler, thumbnail_quality: u8) -> RunSummary {
    let mut summary = RunSummary {
        total: paths.len(),
        ..RunSummary::default()
    };

    for path in paths {
        match process_file(path, map, thumbnail_quality) {
            Ok(coordinate) => {
                summary.marked += 1;
                debug!("✅ Marked {} at {}", path.display(), coordinate);
            }
            Err(reason) => {
                warn!("⏭️  Skipping: {}", reason);
                *summary.skipped.entry(reason.kind()).or_insert(0) += 1;
            }
        }
    }

    summary
}

/// Full run: pick a folder, process its images, write the map.
///
/// Returns `Ok(None)` when there was nothing to process; no document is
/// written in that case.
pub fn run(selector: &dyn FolderSelector, options: &PipelineOptions) -> Result<Option<RunSummary>> {
    let Some((folder, files)) = collect_images(selector) else {
        return Ok(None);
    };

    let mut map = MapAssembler::new(options.view);
    let mut summary = process_batch(&files, &mut map, options.thumbnail_quality);
    summary.folder = folder;
    summary.log();

    map.finalize(&options.output)?;
    Ok(Some(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jpeg_with_fields, plain_jpeg, write_file, FieldSpec};
    use tempfile::TempDir;

    const SEOUL_LAT: [(u32, u32); 3] = [(37, 1), (33, 1), (0, 1)];
    const SEOUL_LNG: [(u32, u32); 3] = [(126, 1), (58, 1), (48, 1)];

    #[test]
    fn tagged_file_is_marked() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "seoul.jpg",
            &jpeg_with_fields(
                16,
                12,
                &[
                    FieldSpec::Latitude(SEOUL_LAT, "N"),
                    FieldSpec::Longitude(SEOUL_LNG, "E"),
                    FieldSpec::DateTimeOriginal("2022:10:01 09:00:00"),
                ],
            ),
        );

        let mut map = MapAssembler::new(MapView::default());
        let c = process_file(&path, &mut map, 85).unwrap();
        assert!((c.lat - 37.55).abs() < 1e-9);
        assert!((c.lng - (126.0 + 58.0 / 60.0 + 48.0 / 3600.0)).abs() < 1e-9);
        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.markers()[0].label, "seoul.jpg");
        assert!(map.markers()[0].popup.contains("2022-10-01 09:00:00"));
        assert_eq!(map.heat_points(), &[c]);
    }

    #[test]
    fn each_skip_path_has_its_own_kind() {
        let dir = TempDir::new().unwrap();
        let no_meta = write_file(&dir, "plain.jpg", &plain_jpeg(8, 8));
        let no_gps = write_file(&dir, "nogps.jpg", &jpeg_with_fields(8, 8, &[FieldSpec::Orientation(1)]));
        let partial = write_file(
            &dir,
            "partial.jpg",
            &jpeg_with_fields(8, 8, &[FieldSpec::Latitude(SEOUL_LAT, "N")]),
        );

        let mut map = MapAssembler::new(MapView::default());
        assert!(matches!(
            process_file(&no_meta, &mut map, 85),
            Err(SkipReason::NoMetadata { .. })
        ));
        assert!(matches!(
            process_file(&no_gps, &mut map, 85),
            Err(SkipReason::NoGpsBlock { .. })
        ));
        assert!(matches!(
            process_file(&partial, &mut map, 85),
            Err(SkipReason::IncompleteGps { missing: "GPSLongitude", .. })
        ));
        assert!(map.markers().is_empty());
        assert!(map.heat_points().is_empty());
    }

    #[test]
    fn batch_counts_marks_and_skips() {
        let dir = TempDir::new().unwrap();
        let tagged = write_file(
            &dir,
            "a.jpg",
            &jpeg_with_fields(
                8,
                8,
                &[FieldSpec::Latitude(SEOUL_LAT, "S"), FieldSpec::Longitude(SEOUL_LNG, "W")],
            ),
        );
        let plain = write_file(&dir, "b.jpg", &plain_jpeg(8, 8));

        let mut map = MapAssembler::new(MapView::default());
        let summary = process_batch(&[tagged, plain], &mut map, 85);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.marked, 1);
        assert_eq!(summary.skipped.get("no-metadata"), Some(&1));
        assert_eq!(summary.skipped_total(), 1);
        assert!(map.heat_points()[0].lat < 0.0 && map.heat_points()[0].lng < 0.0);
    }
}
