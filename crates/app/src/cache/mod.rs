//! Credential cache: the key/value store with per-key TTL that decides whether
//! a token is still live.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use mockall::automock;

mod errors;
mod memory;
mod remote;

pub use errors::CacheError;
pub use memory::MemoryCredentialCache;
pub use remote::RedisCredentialCache;

/// A namespaced cache key: `<prefix>:<param>`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build the key for `param` inside the `prefix` namespace.
    #[must_use]
    pub fn new(prefix: &str, param: &str) -> Self {
        Self(format!("{prefix}:{param}"))
    }

    /// The full key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keys embed raw token material, so only the namespace is ever printed.
impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.0.split_once(':').map_or("", |(prefix, _)| prefix);

        write!(f, "CacheKey({prefix}:**redacted**)")
    }
}

#[automock]
#[async_trait]
/// Remote credential store operations.
pub trait CredentialCache: Send + Sync {
    /// Store `value` under `key`, expiring after `ttl`. Overwrites silently.
    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Read a live entry; a missing or expired key is [`CacheError::NotFound`].
    async fn get(&self, key: &CacheKey) -> Result<String, CacheError>;

    /// Remove an entry. Deleting an absent key succeeds.
    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_joins_prefix_and_param() {
        assert_eq!(CacheKey::new("access_token", "abc").as_str(), "access_token:abc");
    }

    #[test]
    fn key_debug_hides_param() {
        let debug = format!("{:?}", CacheKey::new("access_token", "secret-token"));

        assert!(debug.contains("access_token"));
        assert!(!debug.contains("secret-token"));
    }
}
