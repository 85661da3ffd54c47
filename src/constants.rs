// Map defaults
pub const DEFAULT_CENTER_LAT: f64 = 36.3;
pub const DEFAULT_CENTER_LNG: f64 = 128.0;
pub const DEFAULT_ZOOM: u8 = 8;
pub const DEFAULT_OUTPUT_FILE: &str = "my_map.html";

// Popup thumbnail. The canvas is fixed and square: the popup markup relies on it.
pub const POPUP_THUMBNAIL_SIZE: u32 = 300;
pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 85;
pub const POPUP_FRAME_WIDTH: u32 = 310;
pub const POPUP_FRAME_HEIGHT: u32 = 420;

// Shown in the popup when DateTimeOriginal is missing
pub const UNKNOWN_TIMESTAMP: &str = "unknown";

// Only these are listed from the selected folder (compared lowercase)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub const SETTINGS_FILE_NAME: &str = "photo_geomap.ini";
pub const FOLDER_DIALOG_TITLE: &str = "Select a folder with photos";
