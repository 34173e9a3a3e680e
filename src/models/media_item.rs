use std::path::{Path, PathBuf};

/// Extension given to downloaded items.
pub const DOWNLOAD_EXTENSION: &str = "gif";

/// File extensions picked up when a directory is used as the catalog.
pub const MEDIA_EXTENSIONS: &[&str] = &["gif", "webp", "png", "jpg", "jpeg"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub title: String,
    pub source: PathBuf,
}

impl MediaItem {
    pub fn new(title: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
        }
    }

    /// Build an item from a file on disk, deriving the title from its stem.
    pub fn from_file_name(relative: &Path) -> Self {
        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let title = stem
            .split(['_', '-'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(title, relative)
    }

    /// Resolve the source against the base directory unless it is already
    /// prefixed with it.
    pub fn resolved_source(&self, base_dir: &Path) -> PathBuf {
        if base_dir.as_os_str().is_empty() || self.source.starts_with(base_dir) {
            self.source.clone()
        } else {
            base_dir.join(&self.source)
        }
    }

    /// Title with every whitespace run collapsed to `_`, plus the media extension.
    pub fn download_file_name(&self) -> String {
        let mut stem = String::with_capacity(self.title.len());
        let mut in_run = false;
        for ch in self.title.chars() {
            if ch.is_whitespace() {
                if !in_run {
                    stem.push('_');
                }
                in_run = true;
            } else {
                stem.push(ch);
                in_run = false;
            }
        }
        format!("{}.{}", stem, DOWNLOAD_EXTENSION)
    }
}

/// Check whether a path carries one of the supported media extensions.
pub fn is_media_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            MEDIA_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_source_adds_base() {
        let item = MediaItem::new("Cat", "cat.gif");
        assert_eq!(
            item.resolved_source(Path::new("Gif_Dump")),
            PathBuf::from("Gif_Dump/cat.gif")
        );
    }

    #[test]
    fn test_resolved_source_keeps_prefixed_path() {
        let item = MediaItem::new("Cat", "Gif_Dump/cat.gif");
        assert_eq!(
            item.resolved_source(Path::new("Gif_Dump/")),
            PathBuf::from("Gif_Dump/cat.gif")
        );
    }

    #[test]
    fn test_download_file_name_collapses_whitespace() {
        let item = MediaItem::new("Dancing   cat \t on a  roof", "cat.gif");
        assert_eq!(item.download_file_name(), "Dancing_cat_on_a_roof.gif");

        let padded = MediaItem::new(" spin ", "spin.gif");
        assert_eq!(padded.download_file_name(), "_spin_.gif");
    }

    #[test]
    fn test_title_from_file_name() {
        let item = MediaItem::from_file_name(Path::new("happy_dog-jump.gif"));
        assert_eq!(item.title, "happy dog jump");
        assert_eq!(item.source, PathBuf::from("happy_dog-jump.gif"));
    }

    #[test]
    fn test_media_extension_filter() {
        assert!(is_media_path(Path::new("a/b.GIF")));
        assert!(is_media_path(Path::new("b.webp")));
        assert!(!is_media_path(Path::new("notes.txt")));
        assert!(!is_media_path(Path::new("no_extension")));
    }
}
