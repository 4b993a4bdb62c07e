//! Routing backends for the mailmask relay.
//!
//! Implementations of the [`Router`](mailmask_core::Router) contract: an
//! in-memory double used by the test suites and local development, and a
//! Mailgun client for production deployments.

pub mod mailgun;
pub mod memory;

pub use mailgun::MailgunRouter;
pub use memory::MemoryRouter;
