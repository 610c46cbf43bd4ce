//! Token store adapters
//!
//! `FileTokenStore` keeps entries in a JSON object on disk (`storage.json` in
//! the admin directory); `MemoryTokenStore` is for embedding and tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::result::Result;
use crate::ports::TokenStore;

/// File name of the on-disk store inside the admin directory
pub const STORAGE_FILE: &str = "storage.json";

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Key-value store persisted as a flat JSON object
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileTokenStore {
    /// Open the store in `dir`, starting empty if the file does not exist yet
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(STORAGE_FILE);

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Entries::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<Entries>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding just an access token
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        lock(&store.entries).insert(crate::ports::ACCESS_TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}
