//! Page discovery — turning a comic folder into an ordered image list

use std::path::{Path, PathBuf};

/// Image extensions the reader pages through
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Check if a path has a supported image extension
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the pages of a comic folder: supported images directly inside
/// `dir`, sorted by filename. An unreadable path yields an empty list.
pub fn scan_folder(dir: &Path) -> Vec<PathBuf> {
    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && is_supported(p))
                .collect()
        })
        .unwrap_or_default();

    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    pages
}

/// First page of a folder, used for shelf thumbnails.
pub fn first_page(dir: &Path) -> Option<PathBuf> {
    scan_folder(dir).into_iter().next()
}
