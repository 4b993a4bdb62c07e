//! Core types and traits for the mailmask relay.
//!
//! This crate provides the shared contracts consumed by the storage
//! backends, the routing backends, and the assignment strategies.

pub mod error;
pub mod expiry;
pub mod router;
pub mod storage;

pub use error::{RouterError, RouterResult, StorageError, StorageResult};
pub use expiry::ExpirationPolicy;
pub use router::Router;
pub use storage::{Storage, NEVER_EXPIRE};
