//! Storage utilities for the comicView apps
//!
//! Config-directory resolution, whole-file JSON preferences, and the
//! folder browser used by the add-folder dialog.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Read a whole-file JSON value.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Load a JSON file, falling back to the default value.
/// A missing file is normal (first run); anything else is logged.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => value,
        Err(StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            log::warn!("could not read {}: {}", path.display(), e);
            T::default()
        }
    }
}

/// Write a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Directory picker state for the add-folder dialog.
/// Lists subdirectories only; files are never shown.
#[derive(Debug, Clone)]
pub struct FolderBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<FolderEntry>,
    pub selected_index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct FolderEntry {
    pub name: String,
    pub path: PathBuf,
}

impl FolderBrowser {
    pub fn new(start_dir: PathBuf) -> Self {
        let mut browser = Self {
            current_dir: start_dir,
            entries: Vec::new(),
            selected_index: None,
        };
        browser.refresh();
        browser
    }

    pub fn refresh(&mut self) {
        self.entries.clear();
        self.selected_index = None;

        // Parent directory entry
        if let Some(parent) = self.current_dir.parent() {
            self.entries.push(FolderEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
            });
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.current_dir) {
            let mut dirs = Vec::new();

            for entry in read_dir.flatten() {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();

                // Skip hidden folders
                if name.starts_with('.') {
                    continue;
                }
                if !path.is_dir() {
                    continue;
                }

                dirs.push(FolderEntry { name, path });
            }

            dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            self.entries.extend(dirs);
        }
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.current_dir = path;
            self.refresh();
        }
    }

    pub fn selected_entry(&self) -> Option<&FolderEntry> {
        self.selected_index.and_then(|i| self.entries.get(i))
    }

    /// The folder the dialog would add: the selected entry if there is
    /// one, otherwise the directory being browsed.
    pub fn chosen_dir(&self) -> PathBuf {
        self.selected_entry()
            .map(|e| e.path.clone())
            .unwrap_or_else(|| self.current_dir.clone())
    }
}

/// Get the config directory for the comicView apps
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the pictures directory, the default place to look for comics
pub fn pictures_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
