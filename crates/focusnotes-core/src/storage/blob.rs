//! Single-blob persistence for the storage envelope.
//!
//! The envelope is read and written whole; there are no partial updates.
//! Loading is self-healing: a missing file yields defaults, missing fields
//! fall back to their defaults through serde, the badge list is reseeded
//! from the catalog and the level cache is recomputed from XP.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::badges;
use crate::error::StorageError;
use crate::model::Storage;

/// Opaque persistence for the full [`Storage`] envelope.
pub trait BlobStore: Send + Sync {
    /// Load the envelope, healing what can be healed. A store with no
    /// prior data returns defaults.
    fn load(&self) -> Result<Storage, StorageError>;

    /// Persist the envelope in a single atomic write.
    fn save(&self, storage: &Storage) -> Result<(), StorageError>;
}

fn heal(storage: &mut Storage) {
    storage.stats.heal();
    badges::seed(&mut storage.stats);
}

/// File-backed store: one JSON document, written via temp-file-then-rename
/// so a crash mid-save never leaves a truncated blob behind.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `storage.json` under the data dir.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn at_default_location() -> Result<Self, StorageError> {
        let dir = super::data_dir().map_err(|e| StorageError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(Self::new(dir.join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for JsonFileStore {
    fn load(&self) -> Result<Storage, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let mut storage = Storage::default();
                heal(&mut storage);
                return Ok(storage);
            }
            Err(e) => {
                return Err(StorageError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
        };

        // Unparseable as a whole is an error, not a silent wipe; missing
        // fields inside a parseable document heal to defaults.
        let mut storage: Storage =
            serde_json::from_str(&content).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        heal(&mut storage);
        Ok(storage)
    }

    fn save(&self, storage: &Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(storage)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        let write = fs::write(&tmp, json.as_bytes())
            .and_then(|()| fs::rename(&tmp, &self.path));
        write.map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Storage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an envelope, as if loaded from disk.
    pub fn with(storage: Storage) -> Self {
        Self {
            inner: Mutex::new(Some(storage)),
        }
    }
}

impl BlobStore for MemoryStore {
    fn load(&self) -> Result<Storage, StorageError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let mut storage = guard.clone().unwrap_or_default();
        heal(&mut storage);
        Ok(storage)
    }

    fn save(&self, storage: &Storage) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        *guard = Some(storage.clone());
        Ok(())
    }
}
