//! Key-value persistence for settings and statistics.
//!
//! Values are opaque JSON blobs under fixed keys. Loading is always
//! forgiving: missing keys, unreadable backends, malformed JSON and values
//! failing their validator all fall back to the supplied default, with a
//! `tracing` warning as the only trace of the problem. Saving reports
//! success as a bool and never panics.

use crate::error::{Result, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Storage key for the persisted [`Settings`](crate::types::Settings) blob.
pub const SETTINGS_KEY: &str = "geoquiz-settings";
/// Storage key for the persisted [`Statistics`](crate::types::Statistics) blob.
pub const STATISTICS_KEY: &str = "geoquiz-statistics";

/// A string-keyed blob store.
pub trait Storage {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Load and deserialize the value under `key`, falling back to `default` on
/// any failure. An optional validator rejects structurally well-formed but
/// out-of-range data.
pub fn load<T, S>(storage: &S, key: &str, default: T, validator: Option<fn(&T) -> bool>) -> T
where
    T: DeserializeOwned,
    S: Storage + ?Sized,
{
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read persisted value, using default");
            return default;
        }
    };
    let value: T = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed persisted value, using default");
            return default;
        }
    };
    if let Some(is_valid) = validator {
        if !is_valid(&value) {
            tracing::warn!(key, "persisted value failed validation, using default");
            return default;
        }
    }
    value
}

/// Serialize and store `value` under `key`. Returns whether the save
/// succeeded; failures are logged, never raised.
pub fn save<T, S>(storage: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize,
    S: Storage + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(key, error = %err, "failed to serialize value");
            return false;
        }
    };
    match storage.write(key, &raw) {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(key, error = %err, "failed to write persisted value");
            false
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one `<key>.json` file per key inside a directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Settings, Statistics};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_key_yields_default() {
        let storage = MemoryStorage::new();
        let settings = load(&storage, SETTINGS_KEY, Settings::default(), None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut storage = MemoryStorage::new();
        let settings = Settings {
            timer_enabled: true,
            timer_duration_secs: 60,
        };
        assert!(save(&mut storage, SETTINGS_KEY, &settings));
        let loaded = load(
            &storage,
            SETTINGS_KEY,
            Settings::default(),
            Some(Settings::is_valid),
        );
        assert_eq!(loaded, settings);
    }

    #[test]
    fn malformed_json_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.write(STATISTICS_KEY, "{not json").expect("write");
        let stats = load(&storage, STATISTICS_KEY, Statistics::default(), None);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn validator_rejection_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        let bad = Settings {
            timer_enabled: true,
            timer_duration_secs: 0,
        };
        assert!(save(&mut storage, SETTINGS_KEY, &bad));
        let loaded = load(
            &storage,
            SETTINGS_KEY,
            Settings::default(),
            Some(Settings::is_valid),
        );
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn remove_clears_the_key() {
        let mut storage = MemoryStorage::new();
        storage.write(SETTINGS_KEY, "{}").expect("write");
        storage.remove(SETTINGS_KEY).expect("remove");
        assert_eq!(storage.read(SETTINGS_KEY).expect("read"), None);
    }

    #[test]
    fn file_storage_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path().join("store")).expect("open");

        assert_eq!(storage.read(STATISTICS_KEY).expect("read"), None);
        let stats = Statistics::default();
        assert!(save(&mut storage, STATISTICS_KEY, &stats));
        let loaded = load(
            &storage,
            STATISTICS_KEY,
            Statistics::default(),
            Some(Statistics::is_valid),
        );
        assert_eq!(loaded, stats);

        storage.remove(STATISTICS_KEY).expect("remove");
        assert_eq!(storage.read(STATISTICS_KEY).expect("read"), None);
        // removing again is fine
        storage.remove(STATISTICS_KEY).expect("remove twice");
    }

    #[test]
    fn file_storage_survives_corrupt_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut storage = FileStorage::new(dir.path()).expect("open");
        storage.write(STATISTICS_KEY, "42 garbage").expect("write");
        let loaded = load(
            &storage,
            STATISTICS_KEY,
            Statistics::default(),
            Some(Statistics::is_valid),
        );
        assert_eq!(loaded, Statistics::default());
    }
}
