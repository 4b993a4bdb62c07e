use mailmask_core::{RouterError, StorageError};
use thiserror::Error;

/// Result type for assignment operations.
pub type Result<T> = std::result::Result<T, AssignError>;

#[derive(Debug, Clone, Error)]
pub enum AssignError {
    #[error("failed to produce key: {0}")]
    KeyProduction(#[from] DomainError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("router error: {0}")]
    Router(#[from] RouterError),
}

/// Errors from mapping a URL to its registrable domain.
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("failed to parse url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("url has no host: {0}")]
    NoHost(String),
    #[error("cannot determine effective domain for host: {0}")]
    NoEffectiveDomain(String),
}

/// Errors from validating a strategy configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("email domain must not be empty")]
    MissingEmailDomain,
    #[error("email domain must not contain '@': {0}")]
    InvalidEmailDomain(String),
    #[error("recipient must not be empty")]
    MissingRecipient,
    #[error("recipient must be an email address: {0}")]
    InvalidRecipient(String),
    #[error("temporary assignments require a bounded expiration policy")]
    UnboundedTemporaryExpiry,
}
