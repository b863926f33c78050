//! Storage media for persisted state.
//!
//! `session` storage lives in memory and disappears with the process;
//! `local` storage keeps one JSON document per key in a directory.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::RwLock;
use tempfile::NamedTempFile;
use tracing::debug;

/// Where a store's state is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageScope {
    /// Survives restarts
    Local,
    /// Discarded when the process exits
    Session,
}

impl StorageScope {
    /// Config/string form of the scope.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
        }
    }
}

impl FromStr for StorageScope {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Self::Local),
            "session" => Ok(Self::Session),
            other => Err(StoreError::UnknownScope(other.to_string())),
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key-value storage medium with string values.
pub trait StorageBackend: Send + Sync + fmt::Debug {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().expect("storage lock poisoned");
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items
            .write()
            .expect("storage lock poisoned")
            .remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let items = self.items.read().expect("storage lock poisoned");
        let mut keys: Vec<String> = items.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Directory-backed storage: `{dir}/{key}.json`.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened file storage");
        Ok(Self { dir })
    }

    /// Storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        // Each write gets its own temp file; readers never see a half-written document
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Keys become file names: ASCII letters, digits, `_`, `-` and `.`,
/// no leading dot.
fn validate_key(key: &str) -> Result<()> {
    let invalid = |reason: &str| StoreError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if key.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(invalid("only ASCII letters, digits, '_', '-' and '.' are allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(backend: &dyn StorageBackend) {
        assert_eq!(backend.get_item("auth").expect("get"), None);

        backend.set_item("auth", r#"{"token":"abc"}"#).expect("set");
        backend.set_item("books", "{}").expect("set");
        assert_eq!(
            backend.get_item("auth").expect("get").as_deref(),
            Some(r#"{"token":"abc"}"#)
        );
        assert_eq!(backend.keys().expect("keys"), vec!["auth", "books"]);

        backend.remove_item("auth").expect("remove");
        backend.remove_item("auth").expect("remove missing key");
        assert_eq!(backend.get_item("auth").expect("get"), None);
    }

    #[test]
    fn test_memory_storage() {
        exercise(&MemoryStorage::new());
    }

    #[test]
    fn test_file_storage() {
        let tmp = TempDir::new().expect("create temp dir");
        let storage = FileStorage::new(tmp.path().join("store")).expect("open storage");
        exercise(&storage);
        assert!(storage.dir().ends_with("store"));
    }

    #[test]
    fn test_file_storage_concurrent_writes() {
        let tmp = TempDir::new().expect("create temp dir");
        let storage = FileStorage::new(tmp.path()).expect("open storage");

        std::thread::scope(|scope| {
            for t in 0..8 {
                let storage = &storage;
                scope.spawn(move || {
                    for i in 0..200 {
                        storage
                            .set_item("auth", &format!("{{\"writer\":{t},\"n\":{i}}}"))
                            .expect("concurrent write");
                    }
                });
            }
        });

        let contents = storage.get_item("auth").expect("get").expect("stored");
        assert!(contents.ends_with(":199}"), "last write of some writer: {contents}");
        assert_eq!(storage.keys().expect("keys"), vec!["auth"]);
    }

    #[test]
    fn test_file_storage_rejects_path_traversal() {
        let tmp = TempDir::new().expect("create temp dir");
        let storage = FileStorage::new(tmp.path()).expect("open storage");

        for key in ["../etc/passwd", "a/b", "", ".hidden"] {
            assert!(
                matches!(storage.set_item(key, "{}"), Err(StoreError::InvalidKey { .. })),
                "Should reject: {key}"
            );
        }
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("local".parse::<StorageScope>().expect("parse"), StorageScope::Local);
        assert_eq!(
            "session".parse::<StorageScope>().expect("parse"),
            StorageScope::Session
        );
        assert!("cookie".parse::<StorageScope>().is_err());
        assert_eq!(StorageScope::Session.to_string(), "session");
    }
}
