use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("undefined key: {0}")]
    UndefinedKey(String),
    #[error("undefined value: {0}")]
    UndefinedValue(String),
    #[error("duplicated key: {0}")]
    DuplicatedKey(String),
    #[error("duplicated value: {0}")]
    DuplicatedValue(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Result type for router operations.
pub type RouterResult<T> = std::result::Result<T, RouterError>;

#[derive(Debug, Clone, Error)]
pub enum RouterError {
    #[error("route already exists: {0}")]
    Duplicated(String),
    #[error("no route for: {0}")]
    Undefined(String),
    #[error("router backend failed: {0}")]
    Backend(String),
}
