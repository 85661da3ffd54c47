use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::fs::File;
use tracing::warn;

use crate::constants::*;
use crate::map::MapView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub last_folder: Option<String>,
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
    pub output_file: String,
    pub thumbnail_quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_folder: None,
            center_lat: DEFAULT_CENTER_LAT,
            center_lng: DEFAULT_CENTER_LNG,
            zoom: DEFAULT_ZOOM,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            thumbnail_quality: DEFAULT_THUMBNAIL_QUALITY,
        }
    }
}

fn parse_into<T: std::str::FromStr>(config_map: &HashMap<String, String>, key: &str, target: &mut T) {
    if let Some(raw) = config_map.get(key) {
        match raw.parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!("⚠️  Ignoring invalid value for {}: {}", key, raw),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads `key = value` lines; `#` starts a comment. Unknown keys and
    /// unparsable values are ignored, a missing file gives the defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = Settings::default();
        if !config_path.exists() {
            return Ok(settings);
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let reader = BufReader::new(file);
        let mut config_map = HashMap::new();

        for line in reader.lines() {
            let line = line.context("Failed to read line from config")?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim().to_string(), value.trim().trim_matches('"').to_string());
            }
        }

        if let Some(last_folder) = config_map.get("last_folder") {
            settings.last_folder = Some(last_folder.clone());
        }
        parse_into(&config_map, "center_lat", &mut settings.center_lat);
        parse_into(&config_map, "center_lng", &mut settings.center_lng);
        parse_into(&config_map, "zoom", &mut settings.zoom);
        parse_into(&config_map, "thumbnail_quality", &mut settings.thumbnail_quality);
        if let Some(output_file) = config_map.get("output_file").filter(|s| !s.is_empty()) {
            settings.output_file = output_file.clone();
        }

        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }

        let mut content = String::new();
        content.push_str("# Photo GeoMap Configuration File\n");

        if let Some(ref last_folder) = self.last_folder {
            content.push_str(&format!("last_folder = \"{}\"\n", last_folder));
        }
        content.push_str(&format!("center_lat = {}\n", self.center_lat));
        content.push_str(&format!("center_lng = {}\n", self.center_lng));
        content.push_str(&format!("zoom = {}\n", self.zoom));
        content.push_str(&format!("output_file = \"{}\"\n", self.output_file));
        content.push_str(&format!("thumbnail_quality = {}\n", self.thumbnail_quality));

        std::fs::write(config_path, content).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn update_last_folder<P: AsRef<Path>>(&mut self, folder_path: P) {
        self.last_folder = folder_path.as_ref().to_str().map(|s| s.to_string());
    }

    pub fn last_folder_path(&self) -> Option<PathBuf> {
        self.last_folder.as_ref().map(PathBuf::from)
    }

    pub fn map_view(&self) -> MapView {
        MapView {
            lat: self.center_lat,
            lng: self.center_lng,
            zoom: self.zoom,
            ..MapView::default()
        }
    }

    /// Next to the executable, outside `target/{debug,release}` during development.
    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(SETTINGS_FILE_NAME);
        path
    }
}
