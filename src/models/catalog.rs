//! The item catalog: an ordered list of media items loaded once at startup.
//!
//! Two sources are supported:
//! - a JSON manifest, an array of `{"title": .., "src": ..}` objects
//! - a directory, scanned for media files and titled from their file names

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::media_item::{is_media_path, MediaItem};

/// Default directory that relative sources resolve against.
pub const DEFAULT_BASE_DIR: &str = "Gif_Dump/";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog manifest {path:?}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to scan {path:?}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    title: String,
    #[serde(alias = "source")]
    src: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MediaItem>,
    base_dir: PathBuf,
}

impl Catalog {
    pub fn new(items: Vec<MediaItem>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            items,
            base_dir: base_dir.into(),
        }
    }

    /// Load a catalog from either a manifest file or a media directory.
    ///
    /// `base_dir` only applies to manifests; a scanned directory is its own base.
    pub fn load(path: &Path, base_dir: &Path) -> Result<Self, CatalogError> {
        if path.is_dir() {
            Self::from_directory(path)
        } else {
            Self::from_manifest(path, base_dir)
        }
    }

    pub fn from_manifest(path: &Path, base_dir: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_manifest_str(&text, base_dir).map_err(|source| {
            CatalogError::Manifest {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!(
            "Loaded {} items from manifest {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_manifest_str(text: &str, base_dir: &Path) -> Result<Self, serde_json::Error> {
        let entries: Vec<ManifestEntry> = serde_json::from_str(text)?;
        let items = entries
            .into_iter()
            .map(|entry| MediaItem::new(entry.title, entry.src))
            .collect();
        Ok(Self::new(items, base_dir))
    }

    /// Scan a directory (recursively, skipping hidden entries) for media files.
    pub fn from_directory(dir: &Path) -> Result<Self, CatalogError> {
        let mut sources = Vec::new();
        let walker = WalkDir::new(dir).follow_links(false).into_iter();
        for entry in walker.filter_entry(|entry| {
            entry.depth() == 0
                || entry
                    .file_name()
                    .to_str()
                    .map(|name| !name.starts_with('.'))
                    .unwrap_or(true)
        }) {
            let entry = entry.map_err(|source| CatalogError::Scan {
                path: dir.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() || !is_media_path(entry.path()) {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(dir) {
                sources.push(relative.to_path_buf());
            }
        }
        sources.sort();

        let items: Vec<MediaItem> = sources
            .iter()
            .map(|relative| MediaItem::from_file_name(relative))
            .collect();
        debug!(count = items.len(), dir = %dir.display(), "Scanned media directory");
        info!("Loaded {} items from {}", items.len(), dir.display());
        Ok(Self::new(items, dir))
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Source path of the item at `index`, resolved against the base directory.
    pub fn resolved_source(&self, index: usize) -> Option<PathBuf> {
        self.items
            .get(index)
            .map(|item| item.resolved_source(&self.base_dir))
    }
}
