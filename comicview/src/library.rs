//! Folder registry — the comic folders on the shelf

use comiccore::storage;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name for the registry, under the app config directory.
pub const REGISTRY_FILE: &str = "comic_folders.json";

/// Ordered list of user-added comic folders.
/// Serializes as a bare JSON array of path strings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    folders: Vec<PathBuf>,
}

impl Library {
    /// Load from disk. A missing file is an empty shelf; a malformed
    /// one is logged and treated the same.
    pub fn load(path: &Path) -> Self {
        storage::load_or_default(path)
    }

    pub fn save(&self, path: &Path) {
        if let Err(e) = storage::save_json(path, self) {
            warn!("could not write {}: {}", path.display(), e);
        }
    }

    /// Add a folder to the shelf. Duplicates and non-directories are
    /// ignored. Returns true when the list changed.
    pub fn add(&mut self, path: PathBuf) -> bool {
        if self.folders.contains(&path) || !path.is_dir() {
            return false;
        }
        self.folders.push(path);
        true
    }

    /// Stored folders, in insertion order.
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("comicview_library_{}_{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_round_trip_keeps_one_entry_per_folder() {
        let dir = scratch_dir("roundtrip");
        let comic = dir.join("One Piece");
        std::fs::create_dir(&comic).unwrap();
        let file = dir.join(REGISTRY_FILE);

        let mut library = Library::default();
        assert!(library.add(comic.clone()));
        assert!(!library.add(comic.clone()));
        library.save(&file);

        let reloaded = Library::load(&file);
        assert_eq!(reloaded.folders(), &[comic]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_add_rejects_non_directories() {
        let dir = scratch_dir("nondir");
        let file = dir.join("page.png");
        std::fs::write(&file, b"x").unwrap();

        let mut library = Library::default();
        assert!(!library.add(file));
        assert!(!library.add(dir.join("missing")));
        assert!(library.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_and_malformed_files_load_empty() {
        let dir = scratch_dir("badfile");

        assert!(Library::load(&dir.join("none.json")).is_empty());

        let bad = dir.join("bad.json");
        std::fs::write(&bad, "{\"oops\": 1}").unwrap();
        assert!(Library::load(&bad).is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_saved_file_is_a_json_array() {
        let dir = scratch_dir("shape");
        let comic = dir.join("Akira");
        std::fs::create_dir(&comic).unwrap();
        let file = dir.join(REGISTRY_FILE);

        let mut library = Library::default();
        library.add(comic.clone());
        library.save(&file);

        let text = std::fs::read_to_string(&file).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = value.as_array().expect("registry should serialize as an array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].as_str(), comic.to_str());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
