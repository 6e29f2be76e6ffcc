//! Settings storage collaborator.
//!
//! The host platform owns persistence. Surfaces and the dispatcher only see
//! `SettingsStore`, so tests inject `MemoryStore` and the headless host uses
//! `JsonFileStore`.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Key-value settings storage.
///
/// `set` merges the given keys into the stored mapping; concurrent writers
/// race with last-write-wins per key.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the given keys. Keys that are not stored are absent from the result.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Write the given keys, leaving all others untouched.
    async fn set(&self, items: Map<String, Value>) -> Result<()>;
}

fn select_keys(source: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| source.get(*key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

// ===== MemoryStore =====

/// In-memory store with injectable failures.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Map<String, Value>>,
    /// If Some, `get` returns `StorageUnavailable` with this message
    read_error: RwLock<Option<String>>,
    /// If Some, `set` returns `StorageUnavailable` with this message
    write_error: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated from a JSON object.
    pub fn with_items(items: Map<String, Value>) -> Self {
        Self {
            items: RwLock::new(items),
            ..Self::default()
        }
    }

    pub async fn set_read_error(&self, err: Option<String>) {
        *self.read_error.write().await = err;
    }

    pub async fn set_write_error(&self, err: Option<String>) {
        *self.write_error.write().await = err;
    }

    /// Copy of everything stored, bypassing injected failures.
    pub async fn snapshot(&self) -> Map<String, Value> {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        if let Some(ref msg) = *self.read_error.read().await {
            return Err(Error::StorageUnavailable(msg.clone()));
        }
        Ok(select_keys(&*self.items.read().await, keys))
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        if let Some(ref msg) = *self.write_error.read().await {
            return Err(Error::StorageUnavailable(msg.clone()));
        }
        self.items.write().await.extend(items);
        Ok(())
    }
}

// ===== JsonFileStore =====

/// Store persisted as a single JSON object on disk.
///
/// A missing file reads as an empty mapping. Writes go to a sibling temp file
/// that is renamed over the target, under a lock so two writers in one
/// process cannot interleave. A file that no longer parses fails reads but
/// is replaced by the next write.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Settings file {} not found, starting empty", self.path.display());
                Ok(None)
            }
            Err(e) => Err(Error::StorageUnavailable(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn parse(&self, content: &str) -> Result<Map<String, Value>> {
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        let value = serde_json::from_str::<Value>(content).map_err(|e| {
            Error::StorageUnavailable(format!("{} is not valid JSON: {}", self.path.display(), e))
        })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(Error::StorageUnavailable(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        match self.read().await? {
            Some(content) => self.parse(&content),
            None => Ok(Map::new()),
        }
    }

    async fn write(&self, stored: Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(&Value::Object(stored))?;
        let temp = self.temp_path();

        tokio::fs::write(&temp, content).await.map_err(|e| {
            Error::StorageUnavailable(format!("failed to write {}: {}", temp.display(), e))
        })?;
        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            Error::StorageUnavailable(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let _guard = self.lock.lock().await;
        Ok(select_keys(&self.load().await?, keys))
    }

    async fn set(&self, items: Map<String, Value>) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut stored = match self.read().await? {
            Some(content) => self.parse(&content).unwrap_or_else(|e| {
                warn!("Discarding unreadable settings: {}", e);
                Map::new()
            }),
            None => Map::new(),
        };
        stored.extend(items);

        self.write(stored).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    // ==================== MemoryStore Tests ====================

    #[tokio::test]
    async fn test_memory_get_returns_only_requested_keys() {
        let store = MemoryStore::with_items(map(json!({ "provider": "kagi", "translationCount": 2 })));

        let result = store.get(&["provider", "selectedLanguages"]).await.unwrap();
        assert_eq!(result, map(json!({ "provider": "kagi" })));
    }

    #[tokio::test]
    async fn test_memory_set_merges_keys() {
        let store = MemoryStore::with_items(map(json!({ "provider": "kagi", "translationCount": 2 })));

        store.set(map(json!({ "translationCount": 3 }))).await.unwrap();

        assert_eq!(
            store.snapshot().await,
            map(json!({ "provider": "kagi", "translationCount": 3 }))
        );
    }

    #[tokio::test]
    async fn test_memory_injected_failures() {
        let store = MemoryStore::new();
        store.set_read_error(Some("sync quota".to_string())).await;
        store.set_write_error(Some("offline".to_string())).await;

        assert!(matches!(
            store.get(&["provider"]).await,
            Err(Error::StorageUnavailable(msg)) if msg == "sync quota"
        ));
        assert!(store.set(Map::new()).await.is_err());

        store.set_read_error(None).await;
        assert!(store.get(&["provider"]).await.unwrap().is_empty());
    }

    // ==================== JsonFileStore Tests ====================

    #[tokio::test]
    async fn test_file_missing_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));

        assert!(store.get(&["provider"]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        JsonFileStore::new(&path)
            .set(map(json!({ "selectedLanguages": ["pl", "de"] })))
            .await
            .unwrap();
        JsonFileStore::new(&path)
            .set(map(json!({ "provider": "google" })))
            .await
            .unwrap();

        let result = JsonFileStore::new(&path)
            .get(&["selectedLanguages", "provider"])
            .await
            .unwrap();
        assert_eq!(
            result,
            map(json!({ "selectedLanguages": ["pl", "de"], "provider": "google" }))
        );
    }

    #[tokio::test]
    async fn test_file_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let result = JsonFileStore::new(&path).get(&["provider"]).await;
        assert!(matches!(result, Err(Error::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn test_file_corrupt_json_is_storage_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonFileStore::new(&path).get(&["provider"]).await;
        assert!(matches!(result, Err(Error::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn test_file_truncated_is_repaired_by_next_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"selectedLanguages":["pl""#).unwrap();
        let store = JsonFileStore::new(&path);

        store.set(map(json!({ "provider": "google" }))).await.unwrap();

        assert_eq!(
            store.get(&["selectedLanguages", "provider"]).await.unwrap(),
            map(json!({ "provider": "google" }))
        );
        let on_disk: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, json!({ "provider": "google" }));
    }

    #[tokio::test]
    async fn test_file_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));

        store.set(map(json!({ "translationCount": 1 }))).await.unwrap();
        store.set(map(json!({ "translationCount": 2 }))).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("settings.json")]);
        assert_eq!(store.temp_path(), dir.path().join("settings.json.tmp"));
    }
}
