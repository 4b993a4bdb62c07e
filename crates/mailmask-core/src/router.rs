use crate::error::RouterResult;
use async_trait::async_trait;

/// External mail-routing collaborator.
///
/// A router owns the forwarding rules that turn a disposable address into
/// mail delivered to the configured recipient. The assignment layer only
/// ever adds and removes rules by their exact source address.
#[async_trait]
pub trait Router: Send + Sync + 'static {
    /// Registers a forwarding rule from `from` to `to`.
    ///
    /// Fails with [`RouterError::Duplicated`](crate::RouterError::Duplicated)
    /// if a rule for `from` already exists.
    async fn set(&self, from: &str, to: &str) -> RouterResult<()>;

    /// Removes the forwarding rule for `from`.
    ///
    /// Fails with [`RouterError::Undefined`](crate::RouterError::Undefined)
    /// if no rule for `from` exists.
    async fn unset(&self, from: &str) -> RouterResult<()>;
}
