//! Durable key/value storage for the session. The three session keys are
//! always written and removed in a single operation so a crash can never leave
//! a half-written session behind.

use crate::app_lib::AppError;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Minimal key/value contract the session needs from its backing store.
pub trait KeyValueStore {
    /// # Errors
    /// Returns `AppError::Storage` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Writes every entry in one operation.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the write fails; no entry is applied then.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), AppError>;

    /// Removes every key in one operation.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the write fails; no key is removed then.
    fn remove_many(&mut self, keys: &[&str]) -> Result<(), AppError>;
}

/// In-memory store, used by tests and short-lived embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        for (key, value) in entries {
            self.entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), AppError> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// JSON-object file store. Every mutation rewrites the file through a
/// temporary sibling and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store, creating nothing until the first write. An unreadable
    /// JSON document is discarded and the file reset to an empty object.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the file exists but cannot be read or reset.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("Discarding unreadable session file {}: {err}", path.display());
                    let mut store = Self {
                        path,
                        entries: BTreeMap::new(),
                    };
                    store.persist(&BTreeMap::new())?;
                    return Ok(store);
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {err}",
                    path.display()
                )))
            }
        };

        debug!("opened session file {}", path.display());

        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&mut self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::Storage(format!("Failed to create {}: {err}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)
            .map_err(|err| AppError::Storage(format!("Failed to encode session: {err}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .and_then(|()| restrict_permissions(&tmp))
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|err| {
                let _ = fs::remove_file(&tmp);
                AppError::Storage(format!("Failed to write {}: {err}", self.path.display()))
            })?;

        self.entries = entries.clone();
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), AppError> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert((*key).to_string(), (*value).to_string());
        }
        self.persist(&next)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), AppError> {
        let mut next = self.entries.clone();
        for key in keys {
            next.remove(*key);
        }
        self.persist(&next)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FileGuard {
        dir: PathBuf,
    }

    impl Drop for FileGuard {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    fn scratch() -> (FileGuard, PathBuf) {
        let dir = std::env::temp_dir().join(format!("putevod-admin-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("session.json");
        (FileGuard { dir }, path)
    }

    #[test]
    fn memory_store_sets_and_removes_together() {
        let mut store = MemoryStore::new();
        store
            .set_many(&[(TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "b"), (USER_KEY, "{}")])
            .unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("a"));

        store.remove_many(&SESSION_KEYS).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let (_guard, path) = scratch();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store
            .set_many(&[(TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "b"), (USER_KEY, "{}")])
            .unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("a"));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("b"));
        assert_eq!(reopened.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn file_store_remove_many_clears_all_keys() {
        let (_guard, path) = scratch();

        let mut store = FileStore::open(&path).unwrap();
        store
            .set_many(&[(TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "b"), (USER_KEY, "{}")])
            .unwrap();
        store.remove_many(&SESSION_KEYS).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        for key in SESSION_KEYS {
            assert_eq!(reopened.get(key).unwrap(), None);
        }
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_resets_corrupt_file() {
        let (_guard, path) = scratch();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[cfg(unix)]
    #[test]
    fn file_store_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_guard, path) = scratch();
        let mut store = FileStore::open(&path).unwrap();
        store.set_many(&[(TOKEN_KEY, "a")]).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
