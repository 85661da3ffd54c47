use anyhow::{bail, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{FOLDER_DIALOG_TITLE, SUPPORTED_EXTENSIONS};

/// Source of the folder to process. `None` means the user cancelled.
pub trait FolderSelector {
    fn select_folder(&self) -> Option<PathBuf>;
}

/// Native folder dialog.
pub struct DialogFolderSelector {
    initial_dir: Option<PathBuf>,
}

impl DialogFolderSelector {
    /// Starts in `initial_dir` when it still exists, otherwise on the desktop
    /// (or home when there is no desktop).
    pub fn new(initial_dir: Option<PathBuf>) -> Self {
        let initial_dir = initial_dir
            .filter(|dir| dir.is_dir())
            .or_else(dirs::desktop_dir)
            .or_else(dirs::home_dir);
        Self { initial_dir }
    }
}

impl FolderSelector for DialogFolderSelector {
    fn select_folder(&self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title(FOLDER_DIALOG_TITLE);
        if let Some(dir) = &self.initial_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_folder()
    }
}

/// A folder known up front (command line, saved settings, tests).
pub struct FixedFolder(pub Option<PathBuf>);

impl FolderSelector for FixedFolder {
    fn select_folder(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Supported image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Photos directory not found: {}", dir.display());
    }

    let files = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|e| e.file_type().map_or(false, |ft| ft.is_file()))
        .map(|e| e.into_path())
        .filter(|path| is_supported_image(path))
        .collect();

    Ok(files)
}

/// Asks `selector` for a folder and lists its images.
///
/// `None` when the selection was cancelled, the folder can't be listed, or it
/// holds no supported image; the run should end without output then.
pub fn collect_images(selector: &dyn FolderSelector) -> Option<(PathBuf, Vec<PathBuf>)> {
    let Some(folder) = selector.select_folder() else {
        warn!("❌ No folder selected");
        return None;
    };
    info!("📂 Photos directory: {}", folder.display());

    let files = match list_images(&folder) {
        Ok(files) => files,
        Err(e) => {
            warn!("❌ {}", e);
            return None;
        }
    };

    if files.is_empty() {
        warn!("❌ No image files in {}", folder.display());
        return None;
    }

    info!("✅ Found {} image files", files.len());
    Some((folder, files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("b.Jpeg")));
        assert!(is_supported_image(Path::new("c.png")));
        assert!(!is_supported_image(Path::new("d.heic")));
        assert!(!is_supported_image(Path::new("jpg")));
    }

    #[test]
    fn lists_only_top_level_images_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.JPG");
        touch(dir.path(), "a.png");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), ".hidden.jpeg");
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "c.jpg");

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![".hidden.jpeg", "a.png", "b.JPG"]);
    }

    #[test]
    fn cancelled_or_empty_selection_yields_nothing() {
        assert!(collect_images(&FixedFolder(None)).is_none());

        let dir = TempDir::new().unwrap();
        touch(dir.path(), "readme.md");
        assert!(collect_images(&FixedFolder(Some(dir.path().to_path_buf()))).is_none());

        let missing = dir.path().join("nope");
        assert!(collect_images(&FixedFolder(Some(missing))).is_none());
    }

    #[test]
    fn collects_images_from_selected_folder() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.jpg");
        let (folder, files) = collect_images(&FixedFolder(Some(dir.path().to_path_buf()))).unwrap();
        assert_eq!(folder, dir.path());
        assert_eq!(files, vec![dir.path().join("a.jpg")]);
    }
}
