use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::constants::*;
use crate::exif_parser::Coordinate;
use crate::html_template::render_map_html;
use crate::image_processing::PopupPayload;

/// Initial view of the base map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub lat: f64,
    pub lng: f64,
    pub zoom: u8,
    pub popup_width: u32,
    pub popup_height: u32,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            lat: DEFAULT_CENTER_LAT,
            lng: DEFAULT_CENTER_LNG,
            zoom: DEFAULT_ZOOM,
            popup_width: POPUP_FRAME_WIDTH,
            popup_height: POPUP_FRAME_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub popup: String,
}

/// Collects markers and heat points in processing order and renders them
/// once. `finalize` consumes the assembler, so nothing can be added after the
/// document is written.
#[derive(Debug, Default)]
pub struct MapAssembler {
    view: MapView,
    markers: Vec<Marker>,
    heat_points: Vec<Coordinate>,
}

// `</` would close the surrounding <script> element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("Failed to serialize map data")?;
    Ok(json.replace("</", "<\\/"))
}

impl MapAssembler {
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            markers: Vec::new(),
            heat_points: Vec::new(),
        }
    }

    pub fn add_marker(&mut self, coordinate: Coordinate, payload: &PopupPayload, label: &str) {
        self.markers.push(Marker {
            lat: coordinate.lat,
            lng: coordinate.lng,
            label: label.to_string(),
            popup: payload.html.clone(),
        });
    }

    pub fn add_heat_point(&mut self, coordinate: Coordinate) {
        self.heat_points.push(coordinate);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn heat_points(&self) -> &[Coordinate] {
        &self.heat_points
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Renders the whole document. The heat layer is left out when no
    /// point was collected.
    pub fn render(&self) -> Result<String> {
        let view_json = script_json(&self.view)?;
        let markers_json = script_json(&self.markers)?;
        let heat_json = if self.heat_points.is_empty() {
            None
        } else {
            let points: Vec<[f64; 2]> = self.heat_points.iter().map(|c| [c.lat, c.lng]).collect();
            Some(script_json(&points)?)
        };
        Ok(render_map_html(&view_json, &markers_json, heat_json.as_deref()))
    }

    pub fn finalize(self, path: &Path) -> Result<()> {
        let html = self.render()?;
        std::fs::write(path, html)
            .with_context(|| format!("Failed to write map to {}", path.display()))?;
        info!(
            "🗺️  Map written to {} ({} markers, {} heat points)",
            path.display(),
            self.markers.len(),
            self.heat_points.len()
        );
        Ok(())
    }
}
