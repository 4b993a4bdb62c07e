use crate::address::AddressShape;
use crate::config::StrategyConfig;
use crate::domain::effective_domain;
use crate::error::{ConfigError, Result};
use jiff::Timestamp;
use mailmask_core::{ExpirationPolicy, Router, Storage, StorageError};
use std::sync::Arc;
use tracing::{debug, trace};

/// Generic assign/unassign algorithm shared by both strategies.
///
/// The concrete strategies are thin parameterizations of this state-free
/// core: they differ only in key namespace, address shape, and expiration
/// policy.
pub(crate) struct BaseStrategy<S, R> {
    config: StrategyConfig,
    store: Arc<S>,
    route: Arc<R>,
    key_namespace: &'static str,
    address_shape: AddressShape,
    expiration: ExpirationPolicy,
}

impl<S: Storage, R: Router> BaseStrategy<S, R> {
    pub(crate) fn new(
        config: StrategyConfig,
        store: Arc<S>,
        route: Arc<R>,
        key_namespace: &'static str,
        address_shape: AddressShape,
        expiration: ExpirationPolicy,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            route,
            key_namespace,
            address_shape,
            expiration,
        })
    }

    fn produce_key(&self, url: &str) -> Result<String> {
        let domain = effective_domain(url)?;
        Ok(format!("{}{}", self.key_namespace, domain))
    }

    pub(crate) async fn assign(&self, url: &str) -> Result<String> {
        let key = self.produce_key(url)?;

        match self.store.get(&key).await {
            Ok(addr) => {
                trace!(key = %key, addr = %addr, "assignment already exists");
                return Ok(addr);
            }
            Err(StorageError::UndefinedKey(_)) => {}
            Err(err) => return Err(err.into()),
        }

        let addr = self.address_shape.produce(&self.config.email_domain);
        let expires_at = self.expiration.resolve();

        match self.store.set(&key, &addr, expires_at).await {
            Ok(()) => {}
            // A concurrent assign for the same key won the insert; its
            // address is the assignment, ours is discarded unrouted.
            Err(StorageError::DuplicatedKey(_)) => {
                let existing = self.store.get(&key).await?;
                trace!(key = %key, addr = %existing, "lost insert race, returning winner");
                return Ok(existing);
            }
            Err(err) => return Err(err.into()),
        }

        self.route.set(&addr, &self.config.recipient).await?;

        debug!(key = %key, addr = %addr, "assigned disposable address");
        Ok(addr)
    }

    pub(crate) async fn unassign(&self, url: &str) -> Result<()> {
        let key = self.produce_key(url)?;

        let addr = self.store.unset_by_key(&key).await?;
        self.route.unset(&addr).await?;

        debug!(key = %key, addr = %addr, "unassigned disposable address");
        Ok(())
    }

    pub(crate) async fn unassign_by_addr(&self, addr: &str) -> Result<()> {
        self.store.unset_by_value(addr).await?;
        self.route.unset(addr).await?;

        debug!(addr = %addr, "unassigned disposable address");
        Ok(())
    }

    pub(crate) async fn unassign_expired(&self, until: Timestamp) -> Result<usize> {
        let addrs = self.store.unset_expired(until).await?;

        // The store entries are already gone; a routing failure here leaves
        // dangling rules for the remaining addresses.
        for addr in &addrs {
            self.route.unset(addr).await?;
        }

        debug!(until = %until, count = addrs.len(), "swept expired assignments");
        Ok(addrs.len())
    }
}
