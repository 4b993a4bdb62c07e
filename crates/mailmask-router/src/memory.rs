use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mailmask_core::{Router, RouterError, RouterResult};

/// In-memory implementation of the [`Router`] trait.
///
/// Used by the test suites and local development in place of a real
/// mail-routing backend. The entry API makes insert-if-absent atomic, so
/// concurrent registrations for the same address resolve to one winner.
#[derive(Debug, Default)]
pub struct MemoryRouter {
    routes: DashMap<String, String>,
}

impl MemoryRouter {
    /// Creates an empty in-memory router.
    pub fn new() -> Self {
        Self {
            routes: DashMap::new(),
        }
    }

    /// Returns the recipient the given address forwards to, if any.
    pub fn recipient_of(&self, from: &str) -> Option<String> {
        self.routes.get(from).map(|route| route.value().clone())
    }

    /// Whether a rule for the given address exists.
    pub fn contains(&self, from: &str) -> bool {
        self.routes.contains_key(from)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[async_trait]
impl Router for MemoryRouter {
    async fn set(&self, from: &str, to: &str) -> RouterResult<()> {
        match self.routes.entry(from.to_owned()) {
            Entry::Occupied(_) => Err(RouterError::Duplicated(from.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(to.to_owned());
                Ok(())
            }
        }
    }

    async fn unset(&self, from: &str) -> RouterResult<()> {
        self.routes
            .remove(from)
            .map(|_| ())
            .ok_or_else(|| RouterError::Undefined(from.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_and_unset() {
        let router = MemoryRouter::new();

        router.set("mask@relay.test", "me@inbox.test").await.unwrap();
        assert_eq!(
            router.recipient_of("mask@relay.test").as_deref(),
            Some("me@inbox.test")
        );

        router.unset("mask@relay.test").await.unwrap();
        assert!(!router.contains("mask@relay.test"));
    }

    #[tokio::test]
    async fn set_duplicated_route() {
        let router = MemoryRouter::new();

        router.set("mask@relay.test", "me@inbox.test").await.unwrap();

        let err = router
            .set("mask@relay.test", "other@inbox.test")
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::Duplicated(_)));

        // The original recipient is untouched.
        assert_eq!(
            router.recipient_of("mask@relay.test").as_deref(),
            Some("me@inbox.test")
        );
    }

    #[tokio::test]
    async fn unset_undefined_route() {
        let router = MemoryRouter::new();

        let err = router.unset("missing@relay.test").await.unwrap_err();
        assert!(matches!(err, RouterError::Undefined(_)));
    }
}
