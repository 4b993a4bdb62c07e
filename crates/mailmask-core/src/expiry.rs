use crate::storage::NEVER_EXPIRE;
use jiff::{SignedDuration, Timestamp};

/// Expiration policy for an assigned address.
#[derive(Debug, Clone, Copy)]
pub enum ExpirationPolicy {
    /// The assignment never expires.
    Never,
    /// The assignment expires a fixed duration after it is created.
    AfterDuration(SignedDuration),
    /// The assignment expires at a specific timestamp.
    AtTimestamp(Timestamp),
}

impl ExpirationPolicy {
    /// Resolves the policy to a concrete expiry.
    ///
    /// `AfterDuration` is evaluated against the clock at call time, so the
    /// deadline is fixed when the assignment is created, not when the policy
    /// is constructed.
    pub fn resolve(&self) -> Timestamp {
        match self {
            ExpirationPolicy::Never => NEVER_EXPIRE,
            ExpirationPolicy::AfterDuration(ttl) => Timestamp::now() + *ttl,
            ExpirationPolicy::AtTimestamp(at) => *at,
        }
    }

    /// Whether the policy keeps entries forever.
    pub fn is_never(&self) -> bool {
        matches!(self, ExpirationPolicy::Never)
    }
}
