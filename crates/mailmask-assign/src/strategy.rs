use crate::error::Result;
use async_trait::async_trait;
use jiff::Timestamp;

/// An assignment policy binding disposable addresses to sites.
///
/// Implementations are object-safe so the gateway can hold a set of them
/// behind `Arc<dyn Strategy>`.
#[async_trait]
pub trait Strategy: Send + Sync + 'static {
    /// Returns the disposable address for the site identified by `url`,
    /// creating and routing a fresh one on first use.
    ///
    /// Repeated calls for the same registrable domain return the same
    /// address.
    async fn assign(&self, url: &str) -> Result<String>;

    /// Removes the assignment for the site identified by `url` along with
    /// its forwarding rule.
    ///
    /// Unassigning a site that was never assigned is an error, not a no-op.
    async fn unassign(&self, url: &str) -> Result<()>;

    /// Removes the assignment that produced `addr` along with its
    /// forwarding rule.
    async fn unassign_by_addr(&self, addr: &str) -> Result<()>;
}

/// Bulk removal of expired assignments.
///
/// Only strategies whose entries can expire implement this.
#[async_trait]
pub trait Sweeper: Send + Sync + 'static {
    /// Removes every assignment whose expiry is strictly before `until`
    /// and its forwarding rule; returns how many were removed.
    async fn unassign_expired(&self, until: Timestamp) -> Result<usize>;
}
