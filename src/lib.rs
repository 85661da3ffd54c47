//! Photo GPS extraction and map rendering.
//!
//! Reads EXIF from the photos of one folder, converts their GPS position to
//! decimal degrees and writes a Leaflet map with a marker per photo and a
//! heat layer over all of them.

pub mod constants;
pub mod error;
pub mod exif_parser;
pub mod folder_picker;
pub mod html_template;
pub mod image_processing;
pub mod map;
pub mod processing;
pub mod settings;

#[cfg(test)]
mod test_utils;

pub use error::{SkipReason, ValueError};
pub use exif_parser::{Coordinate, GpsBlock, TagMap};
pub use map::{MapAssembler, MapView};
pub use processing::{run, PipelineOptions, RunSummary};
