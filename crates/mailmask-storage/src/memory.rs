use async_trait::async_trait;
use jiff::Timestamp;
use mailmask_core::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Timestamp,
}

/// In-memory implementation of the [`Storage`] trait.
///
/// A single `RwLock` guards the whole map: the duplicate-key check, the
/// value-uniqueness scan, and the insert in [`set`](Storage::set) happen
/// inside one write guard. A sharded map would let two writers pass the
/// value scan concurrently and both insert the same value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .map(|entry| entry.value.clone())
            .ok_or_else(|| StorageError::UndefinedKey(key.to_owned()))
    }

    async fn set(&self, key: &str, value: &str, expires_at: Timestamp) -> StorageResult<()> {
        let mut entries = self.entries.write().await;

        if entries.contains_key(key) {
            return Err(StorageError::DuplicatedKey(key.to_owned()));
        }
        if entries.values().any(|entry| entry.value == value) {
            return Err(StorageError::DuplicatedValue(value.to_owned()));
        }

        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn unset_by_key(&self, key: &str) -> StorageResult<String> {
        let mut entries = self.entries.write().await;
        entries
            .remove(key)
            .map(|entry| entry.value)
            .ok_or_else(|| StorageError::UndefinedKey(key.to_owned()))
    }

    async fn unset_by_value(&self, value: &str) -> StorageResult<String> {
        let mut entries = self.entries.write().await;

        let key = entries
            .iter()
            .find(|(_, entry)| entry.value == value)
            .map(|(key, _)| key.clone());

        key.and_then(|key| entries.remove(&key))
            .map(|entry| entry.value)
            .ok_or_else(|| StorageError::UndefinedValue(value.to_owned()))
    }

    async fn unset_expired(&self, until: Timestamp) -> StorageResult<Vec<String>> {
        let mut entries = self.entries.write().await;

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.expires_at < until)
            .map(|(key, _)| key.clone())
            .collect();

        let mut values = Vec::with_capacity(expired.len());
        for key in expired {
            if let Some(entry) = entries.remove(&key) {
                values.push(entry.value);
            }
        }
        Ok(values)
    }
}
