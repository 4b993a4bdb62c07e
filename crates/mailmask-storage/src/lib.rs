//! Storage backends for the mailmask relay.
//!
//! Two implementations of the [`Storage`](mailmask_core::Storage) contract:
//! an in-memory map for tests and single-process deployments, and a Redis
//! backend for deployments that need the assignment table to survive
//! restarts.

pub mod memory;
pub mod redis;

pub use memory::MemoryStorage;
pub use redis::RedisStorage;
