//! Session state shared by CLI invocations.
//!
//! A concurrent key/value map, persisted as a flat JSON object.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use crate::wallet::error::{WalletError, WalletResult};

/// Key under which the connected wallet address is stored.
pub const ACCOUNT_KEY: &str = "account";

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<String, String>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the store at `path`, loading it if the file exists.
    pub fn load(path: impl AsRef<Path>) -> WalletResult<Self> {
        let path = path.as_ref();
        let store = Self {
            inner: Arc::new(DashMap::new()),
            path: Some(path.to_path_buf()),
        };
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let map: BTreeMap<String, String> = serde_json::from_reader(reader)
                .map_err(|e| WalletError::Session(format!("{}: {}", path.display(), e)))?;
            for (key, value) in map {
                store.inner.insert(key, value);
            }
            tracing::debug!(path = %path.display(), entries = store.inner.len(), "Loaded session");
        }
        Ok(store)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.inner.remove(key).map(|(_, v)| v)
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    pub fn connected_account(&self) -> Option<String> {
        self.get(ACCOUNT_KEY)
    }

    /// Write the store to its file. No-op for in-memory stores.
    pub fn save(&self) -> WalletResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let map: BTreeMap<String, String> = self
            .inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &map)
            .map_err(|e| WalletError::Session(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), entries = map.len(), "Saved session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_operations() {
        let store = SessionStore::in_memory();
        assert!(store.connected_account().is_none());

        store.set(ACCOUNT_KEY, "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe");
        assert_eq!(
            store.connected_account().as_deref(),
            Some("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe")
        );

        assert!(store.remove(ACCOUNT_KEY).is_some());
        assert!(store.connected_account().is_none());

        store.set("a", "1");
        store.clear();
        assert!(store.get("a").is_none());
        store.save().unwrap();
    }

    #[test]
    fn test_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::load(&path).unwrap();
        store.set(ACCOUNT_KEY, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        store.save().unwrap();

        let loaded = SessionStore::load(&path).unwrap();
        assert_eq!(
            loaded.connected_account().as_deref(),
            Some("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")
        );
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "not json").unwrap();
        assert!(matches!(SessionStore::load(file.path()), Err(WalletError::Session(_))));
    }
}
