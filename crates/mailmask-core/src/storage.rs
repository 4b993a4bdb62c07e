use crate::error::StorageResult;
use async_trait::async_trait;
use jiff::Timestamp;

/// Sentinel expiry for entries that never expire.
///
/// Permanent entries carry this timestamp instead of an `Option` so that
/// expiry comparisons stay total: `expires_at < until` holds for every
/// expirable entry and for no permanent one.
pub const NEVER_EXPIRE: Timestamp = Timestamp::MAX;

/// Key-value store with uniqueness enforced in both directions.
///
/// Every live entry has a unique key and a unique value. The duplicate
/// checks in [`set`](Storage::set) and the insert itself must form a single
/// atomic step with respect to concurrent callers.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    /// Returns the value stored under `key`.
    ///
    /// Fails with [`StorageError::UndefinedKey`](crate::StorageError::UndefinedKey) if the key is absent.
    async fn get(&self, key: &str) -> StorageResult<String>;

    /// Inserts a new entry.
    ///
    /// Fails with [`StorageError::DuplicatedKey`](crate::StorageError::DuplicatedKey) if `key` is already
    /// present, or [`StorageError::DuplicatedValue`](crate::StorageError::DuplicatedValue) if `value` is already
    /// stored under a different key.
    async fn set(&self, key: &str, value: &str, expires_at: Timestamp) -> StorageResult<()>;

    /// Deletes the entry stored under `key` and returns its value.
    ///
    /// Fails with [`StorageError::UndefinedKey`](crate::StorageError::UndefinedKey) if the key is absent.
    async fn unset_by_key(&self, key: &str) -> StorageResult<String>;

    /// Deletes the entry holding `value` and returns that value.
    ///
    /// Fails with [`StorageError::UndefinedValue`](crate::StorageError::UndefinedValue) if no entry holds it.
    async fn unset_by_value(&self, value: &str) -> StorageResult<String>;

    /// Deletes every entry whose expiry is strictly before `until`.
    ///
    /// Returns the deleted values; the empty vector when nothing qualifies.
    async fn unset_expired(&self, until: Timestamp) -> StorageResult<Vec<String>>;
}
