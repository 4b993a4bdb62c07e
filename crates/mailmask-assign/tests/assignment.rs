use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mailmask_assign::{
    AssignError, DefaultStrategy, Strategy, StrategyConfig, Sweeper, TemporaryStrategy,
};
use mailmask_core::{ExpirationPolicy, Router, RouterError, RouterResult, Storage, StorageError};
use mailmask_router::MemoryRouter;
use mailmask_storage::MemoryStorage;
use std::sync::Arc;

const RECIPIENT: &str = "me@inbox.test";

fn config() -> StrategyConfig {
    StrategyConfig::builder()
        .email_domain("relay.test")
        .recipient(RECIPIENT)
        .build()
}

struct Fixture {
    store: Arc<MemoryStorage>,
    route: Arc<MemoryRouter>,
    permanent: DefaultStrategy<MemoryStorage, MemoryRouter>,
    temporary: TemporaryStrategy<MemoryStorage, MemoryRouter>,
}

fn fixture() -> Fixture {
    fixture_with_policy(ExpirationPolicy::AfterDuration(SignedDuration::from_hours(
        72,
    )))
}

fn fixture_with_policy(policy: ExpirationPolicy) -> Fixture {
    let store = Arc::new(MemoryStorage::new());
    let route = Arc::new(MemoryRouter::new());
    let permanent =
        DefaultStrategy::new(config(), Arc::clone(&store), Arc::clone(&route)).unwrap();
    let temporary =
        TemporaryStrategy::new(config(), Arc::clone(&store), Arc::clone(&route), policy).unwrap();
    Fixture {
        store,
        route,
        permanent,
        temporary,
    }
}

#[tokio::test]
async fn different_sites_get_different_addresses() {
    let f = fixture();

    let first = f
        .permanent
        .assign("https://www.youtube.com/watch?v=mZ0sJQC8qkE")
        .await
        .unwrap();
    let second = f
        .permanent
        .assign("https://github.com/kaz/private-email-relay")
        .await
        .unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn same_site_is_idempotent() {
    let f = fixture();

    let first = f
        .permanent
        .assign("https://www.youtube.com/watch?v=mZ0sJQC8qkE")
        .await
        .unwrap();
    let second = f
        .permanent
        .assign("https://www.youtube.com/watch?v=i-b1lfCWGmc")
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn effectively_same_site_shares_an_address() {
    let f = fixture();

    let first = f
        .permanent
        .assign("https://www.youtube.com/watch?v=mZ0sJQC8qkE")
        .await
        .unwrap();
    let second = f
        .permanent
        .assign("https://music.youtube.com/channel/UCuCfKSM0")
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn sibling_sites_under_public_suffix_stay_apart() {
    let f = fixture();

    let first = f.permanent.assign("https://kaz.github.io").await.unwrap();
    let second = f
        .permanent
        .assign("https://sekai67.github.io")
        .await
        .unwrap();

    assert_ne!(first, second);
}

#[tokio::test]
async fn assignment_registers_a_forwarding_rule() {
    let f = fixture();

    let addr = f.permanent.assign("http://routed.test").await.unwrap();

    assert_eq!(f.route.recipient_of(&addr).as_deref(), Some(RECIPIENT));
}

#[tokio::test]
async fn permanent_and_temporary_namespaces_are_independent() {
    let f = fixture();
    let url = "http://independent.test";

    let perm1 = f.permanent.assign(url).await.unwrap();
    let temp1 = f.temporary.assign(url).await.unwrap();
    assert_ne!(perm1, temp1);

    // Dropping the permanent assignment leaves the temporary one alone.
    f.permanent.unassign(url).await.unwrap();

    let perm2 = f.permanent.assign(url).await.unwrap();
    let temp2 = f.temporary.assign(url).await.unwrap();
    assert_ne!(perm1, perm2);
    assert_eq!(temp1, temp2);

    // And the other way around.
    f.temporary.unassign(url).await.unwrap();

    let perm3 = f.permanent.assign(url).await.unwrap();
    let temp3 = f.temporary.assign(url).await.unwrap();
    assert_eq!(perm2, perm3);
    assert_ne!(temp2, temp3);
}

#[tokio::test]
async fn unassign_then_reassign_generates_a_fresh_address() {
    let f = fixture();
    let url = "http://roundtrip.test";

    let first = f.permanent.assign(url).await.unwrap();
    f.permanent.unassign(url).await.unwrap();
    assert!(!f.route.contains(&first));

    let second = f.permanent.assign(url).await.unwrap();
    assert_ne!(first, second);
    assert!(f.route.contains(&second));
}

#[tokio::test]
async fn unassign_by_addr_removes_the_same_entry() {
    let f = fixture();
    let url = "http://by-addr.test";

    let first = f.permanent.assign(url).await.unwrap();
    f.permanent.unassign_by_addr(&first).await.unwrap();

    assert!(!f.route.contains(&first));
    assert!(f.route.is_empty());

    let second = f.permanent.assign(url).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn unassign_never_assigned_site_fails() {
    let f = fixture();

    let err = f.permanent.unassign("http://never.test").await.unwrap_err();
    assert!(matches!(
        err,
        AssignError::Storage(StorageError::UndefinedKey(_))
    ));
}

#[tokio::test]
async fn unassign_by_addr_never_assigned_fails() {
    let f = fixture();

    let err = f
        .permanent
        .unassign_by_addr("never@relay.test")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AssignError::Storage(StorageError::UndefinedValue(_))
    ));
}

#[tokio::test]
async fn unparsable_url_fails_key_production() {
    let f = fixture();

    let err = f.permanent.assign("/no-host.test").await.unwrap_err();
    assert!(matches!(err, AssignError::KeyProduction(_)));

    let err = f.permanent.assign("http://[::1]").await.unwrap_err();
    assert!(matches!(err, AssignError::KeyProduction(_)));
}

#[tokio::test]
async fn sweep_removes_only_strictly_earlier_expiries() {
    let now = Timestamp::now();

    let store = Arc::new(MemoryStorage::new());
    let route = Arc::new(MemoryRouter::new());

    let expired = TemporaryStrategy::new(
        config(),
        Arc::clone(&store),
        Arc::clone(&route),
        ExpirationPolicy::AtTimestamp(now - SignedDuration::from_hours(1)),
    )
    .unwrap();
    let live = TemporaryStrategy::new(
        config(),
        Arc::clone(&store),
        Arc::clone(&route),
        ExpirationPolicy::AtTimestamp(now + SignedDuration::from_hours(1)),
    )
    .unwrap();
    let permanent = DefaultStrategy::new(config(), Arc::clone(&store), Arc::clone(&route)).unwrap();

    let gone = expired.assign("http://sweep-gone.test").await.unwrap();
    let kept = live.assign("http://sweep-kept.test").await.unwrap();
    let forever = permanent.assign("http://sweep-kept.test").await.unwrap();

    let count = expired.unassign_expired(now).await.unwrap();
    assert_eq!(count, 1);

    assert!(!route.contains(&gone));
    assert!(route.contains(&kept));
    assert!(route.contains(&forever));

    // The swept site can be assigned again, freshly.
    let reassigned = expired.assign("http://sweep-gone.test").await.unwrap();
    assert_ne!(reassigned, gone);
}

#[tokio::test]
async fn sweep_before_any_deadline_removes_nothing() {
    let f = fixture();

    for url in [
        "http://sweep-0.test",
        "http://sweep-1.test",
        "http://sweep-2.test",
        "http://sweep-3.test",
    ] {
        f.temporary.assign(url).await.unwrap();
    }

    let count = f.temporary.unassign_expired(Timestamp::now()).await.unwrap();
    assert_eq!(count, 0);

    let count = f
        .temporary
        .unassign_expired(Timestamp::now() + SignedDuration::from_hours(365 * 24))
        .await
        .unwrap();
    assert_eq!(count, 4);
    assert!(f.route.is_empty());
}

#[tokio::test]
async fn concurrent_assigns_converge_on_one_address() {
    let f = fixture();
    let strategy = Arc::new(f.permanent);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let strategy = Arc::clone(&strategy);
        handles.push(tokio::spawn(async move {
            strategy.assign("http://contended.test").await
        }));
    }

    let mut addrs = Vec::new();
    for handle in handles {
        addrs.push(handle.await.unwrap().unwrap());
    }

    addrs.dedup();
    assert_eq!(addrs.len(), 1);
    assert_eq!(f.route.len(), 1);
    assert!(f.route.contains(&addrs[0]));

    // Exactly one store entry backs the address.
    assert_eq!(f.store.unset_by_value(&addrs[0]).await.unwrap(), addrs[0]);
}

/// Router double that rejects every mutation.
struct RejectingRouter;

#[async_trait]
impl Router for RejectingRouter {
    async fn set(&self, from: &str, _to: &str) -> RouterResult<()> {
        Err(RouterError::Backend(format!("rejected: {from}")))
    }

    async fn unset(&self, from: &str) -> RouterResult<()> {
        Err(RouterError::Backend(format!("rejected: {from}")))
    }
}

#[tokio::test]
async fn routing_failure_leaves_the_store_entry_behind() {
    let store = Arc::new(MemoryStorage::new());
    let strategy =
        DefaultStrategy::new(config(), Arc::clone(&store), Arc::new(RejectingRouter)).unwrap();

    let err = strategy.assign("http://half-done.test").await.unwrap_err();
    assert!(matches!(err, AssignError::Router(_)));

    // The entry was committed before routing failed and is returned as-is
    // by the next assignment; the missing route is not repaired.
    let addr = store.get("half-done.test").await.unwrap();
    let again = strategy.assign("http://half-done.test").await.unwrap();
    assert_eq!(addr, again);
}
