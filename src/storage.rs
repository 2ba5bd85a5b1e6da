//! Persistence slot access.
//!
//! [`StorageBackend`] is a string key/value medium (`localStorage` in the
//! browser, a map in tests). [`PersistentStore`] owns one named slot on a
//! backend and moves [`SaveRecord`]s in and out of it, absorbing every
//! failure: corrupt data loads as the default record and an unusable backend
//! demotes the store to memory-only for the rest of the session.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::save::{self, SaveRecord};

/// A string key/value medium.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    /// When set, every operation fails with [`StorageError::Unavailable`].
    pub unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that refuses every operation, like a browser with storage disabled.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`. Only available on wasm32.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"Cookie Clicker: localStorage is not available".into());
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| {
            web_sys::console::warn_1(&format!("Cookie Clicker: failed to read save: {e:?}").into());
            StorageError::Read {
                key: key.to_string(),
                reason: format!("{e:?}"),
            }
        })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| {
            web_sys::console::warn_1(
                &format!("Cookie Clicker: failed to write save to localStorage: {e:?}").into(),
            );
            StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            }
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|e| StorageError::Remove {
            key: key.to_string(),
            reason: format!("{e:?}"),
        })
    }
}

/// Where saves currently go.
#[derive(Debug)]
enum Mode {
    Backed,
    /// The backend failed; keep the latest blob here instead.
    MemoryOnly(Option<String>),
}

/// One named save slot on a backend.
pub struct PersistentStore<B: StorageBackend> {
    backend: B,
    key: String,
    mode: Mode,
}

impl<B: StorageBackend> PersistentStore<B> {
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            mode: Mode::Backed,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a backend failure has demoted this store to memory-only.
    pub fn is_memory_only(&self) -> bool {
        matches!(self.mode, Mode::MemoryOnly(_))
    }

    /// Read the slot. Never fails: missing or corrupt data yields the default record.
    pub fn load(&mut self) -> SaveRecord {
        let blob = if let Mode::MemoryOnly(blob) = &self.mode {
            blob.clone()
        } else {
            match self.backend.read(&self.key) {
                Ok(blob) => blob,
                Err(e) => {
                    self.degrade(&e, None);
                    None
                }
            }
        };

        let Some(blob) = blob else {
            debug!(key = %self.key, "no save found, starting fresh");
            return SaveRecord::default();
        };
        match save::decode(&blob) {
            Ok(record) => {
                info!(key = %self.key, "save loaded");
                record
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "save data is corrupt, starting fresh");
                SaveRecord::default()
            }
        }
    }

    /// Overwrite the slot with the full record.
    pub fn save(&mut self, record: &SaveRecord) {
        let blob = match save::encode(record) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(key = %self.key, error = %e, "refusing to save, previous save kept");
                return;
            }
        };
        if let Mode::MemoryOnly(slot) = &mut self.mode {
            *slot = Some(blob);
            return;
        }
        if let Err(e) = self.backend.write(&self.key, &blob) {
            self.degrade(&e, Some(blob));
        }
    }

    /// Delete the slot.
    pub fn clear(&mut self) {
        if let Mode::MemoryOnly(slot) = &mut self.mode {
            *slot = None;
            return;
        }
        if let Err(e) = self.backend.remove(&self.key) {
            self.degrade(&e, None);
        }
    }

    fn degrade(&mut self, error: &StorageError, blob: Option<String>) {
        warn!(
            key = %self.key,
            %error,
            "storage failed, keeping progress in memory for this session"
        );
        self.mode = Mode::MemoryOnly(blob);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};

    const KEY: &str = "gameData";

    fn record() -> SaveRecord {
        let mut r = SaveRecord {
            cookies: 250.0,
            total_clicks: 12,
            total_cookies: 300.0,
            start_time: Some(1_000),
            ..SaveRecord::default()
        };
        r.amounts[1] = 2;
        r
    }

    #[test]
    fn empty_slot_loads_default() {
        let mut store = PersistentStore::new(MemoryStorage::new(), KEY);
        assert_eq!(store.load(), SaveRecord::default());
    }

    #[test]
    fn save_then_load() {
        let mut store = PersistentStore::new(MemoryStorage::new(), KEY);
        store.save(&record());
        assert_eq!(store.load(), record());
        assert!(store.backend().get(KEY).is_some());
    }

    #[test]
    fn save_overwrites() {
        let mut store = PersistentStore::new(MemoryStorage::new(), KEY);
        store.save(&record());
        store.save(&SaveRecord::default());
        assert_eq!(store.load(), SaveRecord::default());
    }

    #[test]
    fn corrupt_blob_loads_default() {
        let blobs = [
            "%%%".to_string(),
            "bm90IGpzb24=".to_string(), // "not json"
            general_purpose::STANDARD.encode("\"a string\""),
            general_purpose::STANDARD.encode(r#"{"cookies": true}"#),
        ];
        for blob in &blobs {
            let mut backend = MemoryStorage::new();
            backend.insert(KEY, blob);
            let mut store = PersistentStore::new(backend, KEY);
            assert_eq!(store.load(), SaveRecord::default(), "blob {blob}");
        }
    }

    #[test]
    fn clear_removes_slot() {
        let mut store = PersistentStore::new(MemoryStorage::new(), KEY);
        store.save(&record());
        store.clear();
        assert!(store.backend().get(KEY).is_none());
        assert_eq!(store.load(), SaveRecord::default());
    }

    #[test]
    fn only_the_named_slot_is_touched() {
        let mut backend = MemoryStorage::new();
        backend.insert("other", "keep me");
        let mut store = PersistentStore::new(backend, KEY);
        store.save(&record());
        store.clear();
        assert_eq!(store.backend().get("other"), Some("keep me"));
    }

    #[test]
    fn unavailable_backend_degrades_to_memory() {
        let mut store = PersistentStore::new(MemoryStorage::unavailable(), KEY);
        assert_eq!(store.load(), SaveRecord::default());
        assert!(store.is_memory_only());

        store.save(&record());
        assert_eq!(store.load(), record());
        store.clear();
        assert_eq!(store.load(), SaveRecord::default());
    }

    #[test]
    fn write_failure_keeps_latest_blob() {
        let mut store = PersistentStore::new(MemoryStorage::new(), KEY);
        store.save(&SaveRecord::default());
        store.backend.unavailable = true;
        store.save(&record());
        assert!(store.is_memory_only());
        assert_eq!(store.load(), record());
    }

    #[test]
    fn non_finite_record_keeps_previous_save() {
        let mut store = PersistentStore::new(MemoryStorage::new(), KEY);
        store.save(&record());
        store.save(&SaveRecord {
            cookies: f64::NAN,
            ..SaveRecord::default()
        });
        assert_eq!(store.load(), record());
        assert!(!store.is_memory_only());
    }
}
