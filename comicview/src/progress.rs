//! Reading progress — last viewed page per comic folder

use comiccore::storage;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File name for the progress map, under the app config directory.
pub const PROGRESS_FILE: &str = "reading_progress.json";

/// Last-viewed page index keyed by folder basename.
/// Serializes as a bare JSON object; keys come out sorted, which keeps
/// the file stable across saves.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    pages: BTreeMap<String, usize>,
}

impl Progress {
    /// Load from disk, degrading to an empty map on any problem.
    pub fn load(path: &Path) -> Self {
        storage::load_or_default(path)
    }

    pub fn save(&self, path: &Path) {
        if let Err(e) = storage::save_json(path, self) {
            warn!("could not write {}: {}", path.display(), e);
        }
    }

    /// Saved page index for a folder, None when it was never read.
    pub fn page_for(&self, name: &str) -> Option<usize> {
        self.pages.get(name).copied()
    }

    pub fn set_page(&mut self, name: &str, page: usize) {
        self.pages.insert(name.to_string(), page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("comicview_progress_{}_{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_round_trip_restores_pages() {
        let dir = scratch_dir("roundtrip");
        let file = dir.join(PROGRESS_FILE);

        let mut progress = Progress::default();
        progress.set_page("Dragon Ball", 12);
        progress.set_page("Akira", 3);
        progress.save(&file);

        let reloaded = Progress::load(&file);
        assert_eq!(reloaded.page_for("Dragon Ball"), Some(12));
        assert_eq!(reloaded.page_for("Akira"), Some(3));
        assert_eq!(reloaded.page_for("never read"), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_set_page_overwrites() {
        let mut progress = Progress::default();
        progress.set_page("Akira", 1);
        progress.set_page("Akira", 7);
        assert_eq!(progress.page_for("Akira"), Some(7));
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = scratch_dir("badfile");
        let bad = dir.join("bad.json");
        std::fs::write(&bad, "[1, 2, 3]").unwrap();

        let progress = Progress::load(&bad);
        assert_eq!(progress.page_for("anything"), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_saved_file_is_a_json_object() {
        let dir = scratch_dir("shape");
        let file = dir.join(PROGRESS_FILE);

        let mut progress = Progress::default();
        progress.set_page("Dragon Ball", 12);
        progress.save(&file);

        let text = std::fs::read_to_string(&file).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let map = value.as_object().expect("progress should serialize as an object");
        assert_eq!(map.get("Dragon Ball").and_then(|v| v.as_u64()), Some(12));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
