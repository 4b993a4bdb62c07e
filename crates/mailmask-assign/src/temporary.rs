use crate::address::AddressShape;
use crate::base::BaseStrategy;
use crate::config::StrategyConfig;
use crate::error::{ConfigError, Result};
use crate::strategy::{Strategy, Sweeper};
use async_trait::async_trait;
use jiff::Timestamp;
use mailmask_core::{ExpirationPolicy, Router, Storage};
use std::sync::Arc;

/// Namespace prefix keeping temporary keys apart from permanent ones, so a
/// site can hold one assignment of each kind at the same time.
pub const KEY_NAMESPACE: &str = "temp#";

const ADDRESS_SHAPE: AddressShape = AddressShape {
    prefix: "t-",
    suffix_len: 6,
};

/// Bounded-lifetime assignment.
///
/// Keys live in the `temp#` namespace, addresses carry a `t-` prefix with
/// six random letters, and every entry expires per the injected policy,
/// resolved when the assignment is created.
pub struct TemporaryStrategy<S, R> {
    inner: BaseStrategy<S, R>,
}

impl<S: Storage, R: Router> TemporaryStrategy<S, R> {
    /// Creates the temporary strategy over a shared store and router.
    ///
    /// `expiration` must be bounded; `ExpirationPolicy::Never` is rejected.
    pub fn new(
        config: StrategyConfig,
        store: Arc<S>,
        route: Arc<R>,
        expiration: ExpirationPolicy,
    ) -> std::result::Result<Self, ConfigError> {
        if expiration.is_never() {
            return Err(ConfigError::UnboundedTemporaryExpiry);
        }
        Ok(Self {
            inner: BaseStrategy::new(
                config,
                store,
                route,
                KEY_NAMESPACE,
                ADDRESS_SHAPE,
                expiration,
            )?,
        })
    }
}

#[async_trait]
impl<S: Storage, R: Router> Strategy for TemporaryStrategy<S, R> {
    async fn assign(&self, url: &str) -> Result<String> {
        self.inner.assign(url).await
    }

    async fn unassign(&self, url: &str) -> Result<()> {
        self.inner.unassign(url).await
    }

    async fn unassign_by_addr(&self, addr: &str) -> Result<()> {
        self.inner.unassign_by_addr(addr).await
    }
}

#[async_trait]
impl<S: Storage, R: Router> Sweeper for TemporaryStrategy<S, R> {
    async fn unassign_expired(&self, until: Timestamp) -> Result<usize> {
        self.inner.unassign_expired(until).await
    }
}
