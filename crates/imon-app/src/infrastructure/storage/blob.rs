//! File-backed implementation of the preference blob store.
//!
//! Each key becomes one `<key>.bin` file inside a `prefs` directory under
//! the platform config dir (see [`super::config`] for the base path). The
//! store is the per-user settings registry of the application: small,
//! named, fixed-size binary values with last-writer-wins semantics.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::application::preferences::{BlobStore, StoreError};
use crate::infrastructure::storage::config::config_dir;

/// Blob store rooted at a directory on disk.
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Opens the store at the platform preference directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the platform config base
    /// directory cannot be resolved; the host then runs the session without
    /// persistence.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = config_dir()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .join("prefs");
        Ok(Self { dir })
    }

    /// Opens a store rooted at an explicit directory (tests, portable mode).
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.bin"))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str, expected_len: usize) -> Option<Vec<u8>> {
        let path = self.blob_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, "failed to read preference blob: {e}");
                return None;
            }
        };
        if bytes.len() != expected_len {
            // A stale blob from an older layout; the next save overwrites it.
            debug!(
                key,
                stored = bytes.len(),
                expected = expected_len,
                "preference blob size mismatch, using defaults"
            );
            return None;
        }
        Some(bytes)
    }

    fn save(&self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.blob_path(key), blob)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> (FileBlobStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "imon_blob_test_{tag}_{}",
            std::process::id()
        ));
        fs::remove_dir_all(&dir).ok();
        (FileBlobStore::at(dir.clone()), dir)
    }

    #[test]
    fn test_save_then_load_round_trips_bytes() {
        // Arrange
        let (store, dir) = temp_store("roundtrip");
        let blob = [0xDEu8, 0xAD, 0xBE, 0xEF];

        // Act
        store.save("WindowPlacement", &blob).expect("save succeeds");
        let loaded = store.load("WindowPlacement", blob.len());

        // Assert
        assert_eq!(loaded.as_deref(), Some(&blob[..]));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_key_loads_as_none() {
        let (store, dir) = temp_store("missing");

        assert_eq!(store.load("NoSuchKey", 16), None);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_size_mismatch_loads_as_none() {
        // Arrange: stored under an older, shorter layout
        let (store, dir) = temp_store("mismatch");
        store.save("LogFont", &[1, 2, 3]).expect("save succeeds");

        // Act / Assert
        assert_eq!(store.load("LogFont", 4), None);

        // A save at the new size self-heals the entry.
        store.save("LogFont", &[1, 2, 3, 4]).expect("save succeeds");
        assert_eq!(store.load("LogFont", 4), Some(vec![1, 2, 3, 4]));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_replaces_previous_value() {
        let (store, dir) = temp_store("replace");

        store.save("ChooseFont", &[0; 8]).unwrap();
        store.save("ChooseFont", &[7; 8]).unwrap();

        assert_eq!(store.load("ChooseFont", 8), Some(vec![7; 8]));

        fs::remove_dir_all(&dir).ok();
    }
}
