// Recently shown media, bounded by entry count and by decoded bytes.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

pub const MEDIA_CACHE_ENTRIES: usize = 8;
pub const MEDIA_CACHE_BYTES: usize = 384 * 1024 * 1024;

pub struct MediaCache<V> {
    entries: LruCache<PathBuf, (V, usize)>,
    total_bytes: usize,
    max_bytes: usize,
}

impl<V: Clone> MediaCache<V> {
    pub fn new(max_entries: usize, max_bytes: usize) -> Self {
        let cap = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            total_bytes: 0,
            max_bytes,
        }
    }

    pub fn get(&mut self, path: &Path) -> Option<V> {
        self.entries.get(path).map(|(value, _)| value.clone())
    }

    /// Insert `value` weighing `bytes`, evicting least recently used entries
    /// until it fits. Values larger than the whole budget are not cached.
    pub fn put(&mut self, path: PathBuf, value: V, bytes: usize) {
        if let Some((_, old_bytes)) = self.entries.pop(&path) {
            self.total_bytes -= old_bytes;
        }
        if bytes > self.max_bytes {
            return;
        }
        while self.total_bytes + bytes > self.max_bytes {
            match self.entries.pop_lru() {
                Some((_, (_, evicted))) => self.total_bytes -= evicted,
                None => break,
            }
        }
        if let Some((_, (_, evicted))) = self.entries.push(path, (value, bytes)) {
            self.total_bytes -= evicted;
        }
        self.total_bytes += bytes;
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
