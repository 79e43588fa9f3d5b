//! JSON-file-backed store used by the CLI.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use pulsedeck_core::traits::PersistentStore;

/// Persists all keys as one JSON object in a single file.
///
/// I/O and parse failures are logged and treated as absence, so an
/// unreadable file means "no session" rather than an error.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the backing JSON file.
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read store file");
                return BTreeMap::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Store file is not a JSON object");
            BTreeMap::new()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)
    }
}

impl PersistentStore for FileStore {
    fn is_available(&self) -> bool {
        !self.path.is_dir()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.write_all(&entries) {
            warn!(path = %self.path.display(), key, error = %e, "Failed to write store file");
        }
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read_all();
        if entries.remove(key).is_none() {
            return;
        }
        if let Err(e) = self.write_all(&entries) {
            warn!(path = %self.path.display(), key, error = %e, "Failed to write store file");
        }
    }
}
