//! Assignment strategies for the mailmask relay.
//!
//! A strategy turns a caller-supplied URL into a stable disposable address
//! and keeps the storage backend and the mail-routing backend in sync with
//! that assignment. Two variants exist: [`DefaultStrategy`] assigns
//! permanently, [`TemporaryStrategy`] assigns with a bounded lifetime in a
//! namespace of its own.

mod base;

pub mod address;
pub mod config;
pub mod default;
pub mod domain;
pub mod error;
pub mod strategy;
pub mod temporary;

pub use address::AddressShape;
pub use config::StrategyConfig;
pub use default::DefaultStrategy;
pub use domain::effective_domain;
pub use error::{AssignError, ConfigError, DomainError, Result};
pub use strategy::{Strategy, Sweeper};
pub use temporary::TemporaryStrategy;
