use crate::address::AddressShape;
use crate::base::BaseStrategy;
use crate::config::StrategyConfig;
use crate::error::{ConfigError, Result};
use crate::strategy::Strategy;
use async_trait::async_trait;
use mailmask_core::{ExpirationPolicy, Router, Storage};
use std::sync::Arc;

const ADDRESS_SHAPE: AddressShape = AddressShape {
    prefix: "",
    suffix_len: 4,
};

/// Permanent assignment.
///
/// Keys are the registrable domain verbatim, addresses are four random
/// letters under the configured domain, and entries never expire.
pub struct DefaultStrategy<S, R> {
    inner: BaseStrategy<S, R>,
}

impl<S: Storage, R: Router> DefaultStrategy<S, R> {
    /// Creates the permanent strategy over a shared store and router.
    pub fn new(
        config: StrategyConfig,
        store: Arc<S>,
        route: Arc<R>,
    ) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            inner: BaseStrategy::new(
                config,
                store,
                route,
                "",
                ADDRESS_SHAPE,
                ExpirationPolicy::Never,
            )?,
        })
    }
}

#[async_trait]
impl<S: Storage, R: Router> Strategy for DefaultStrategy<S, R> {
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
