//! In-process credential cache.

use std::{sync::Mutex, time::Duration};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::time::Instant;

use crate::cache::{CacheError, CacheKey, CredentialCache};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// A [`CredentialCache`] kept in process memory.
///
/// Expiry follows the tokio clock so tests can pause and advance time. Entries
/// are dropped lazily on read.
#[derive(Debug, Default)]
pub struct MemoryCredentialCache {
    entries: Mutex<FxHashMap<String, Entry>>,
}

impl MemoryCredentialCache {
    /// An empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();

        self.entries
            .lock()
            .map(|entries| entries.values().filter(|entry| entry.expires_at > now).count())
            .unwrap_or_default()
    }

    /// Whether the cache holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut FxHashMap<String, Entry>) -> T) -> T {
        // A poisoned lock only means another task panicked mid-write; the map is still usable.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        f(&mut entries)
    }
}

#[async_trait]
impl CredentialCache for MemoryCredentialCache {
    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };

        self.with_entries(|entries| entries.insert(key.as_str().to_string(), entry));

        Ok(())
    }

    async fn get(&self, key: &CacheKey) -> Result<String, CacheError> {
        let now = Instant::now();

        self.with_entries(|entries| match entries.get(key.as_str()) {
            Some(entry) if entry.expires_at > now => Ok(entry.value.clone()),
            Some(_) => {
                entries.remove(key.as_str());

                Err(CacheError::NotFound)
            }
            None => Err(CacheError::NotFound),
        })
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.with_entries(|entries| entries.remove(key.as_str()));

        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn key() -> CacheKey {
        CacheKey::new("test", "key")
    }

    #[tokio::test]
    async fn get_returns_stored_value() -> TestResult {
        let cache = MemoryCredentialCache::new();

        cache.set(&key(), "value", Duration::from_secs(60)).await?;

        assert_eq!(cache.get(&key()).await?, "value");

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let cache = MemoryCredentialCache::new();

        assert!(matches!(cache.get(&key()).await, Err(CacheError::NotFound)));
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() -> TestResult {
        let cache = MemoryCredentialCache::new();

        cache.set(&key(), "value", Duration::from_secs(60)).await?;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(&key()).await?, "value");

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(matches!(cache.get(&key()).await, Err(CacheError::NotFound)));
        assert!(cache.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> TestResult {
        let cache = MemoryCredentialCache::new();

        cache.set(&key(), "value", Duration::from_secs(60)).await?;
        cache.delete(&key()).await?;
        cache.delete(&key()).await?;

        assert!(matches!(cache.get(&key()).await, Err(CacheError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn set_overwrites_existing_entry() -> TestResult {
        let cache = MemoryCredentialCache::new();

        cache.set(&key(), "first", Duration::from_secs(60)).await?;
        cache.set(&key(), "second", Duration::from_secs(60)).await?;

        assert_eq!(cache.get(&key()).await?, "second");
        assert_eq!(cache.len(), 1);

        Ok(())
    }
}
