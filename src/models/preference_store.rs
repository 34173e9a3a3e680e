//! SQLite-based persistent store for user preferences.
//!
//! Preferences are plain key/value strings kept in a single table. The
//! database lives at `XDG_CONFIG_HOME/gifshelf/preferences.sqlite` unless a
//! path is given explicitly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to determine project directories")]
    NoProjectDirs,
    #[error("failed to create preference directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Durable key/value storage for preferences.
pub trait PreferenceBackend {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// SQLite-backed preference storage.
pub struct PreferenceStore {
    conn: Connection,
}

impl PreferenceStore {
    /// Opens or creates the database at the default XDG location.
    pub fn open_default() -> Result<Self, PreferenceError> {
        let db_path = Self::default_db_path()?;
        Self::open(&db_path)
    }

    /// Returns the default database path based on XDG directories.
    pub fn default_db_path() -> Result<PathBuf, PreferenceError> {
        let proj_dirs =
            ProjectDirs::from("", "", "gifshelf").ok_or(PreferenceError::NoProjectDirs)?;
        Ok(proj_dirs.config_dir().join("preferences.sqlite"))
    }

    /// Opens or creates the database at the specified path.
    pub fn open(path: &Path) -> Result<Self, PreferenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PreferenceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        let store = Self { conn };
        store.create_tables()?;

        info!("Opened preference store at {:?}", path);
        Ok(store)
    }

    fn create_tables(&self) -> Result<(), PreferenceError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl PreferenceBackend for PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        debug!(key, value, "Stored preference");
        Ok(())
    }
}

/// In-process preference storage, used when no database is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl PreferenceBackend for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<B: PreferenceBackend + ?Sized> PreferenceBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).set(key, value)
    }
}
