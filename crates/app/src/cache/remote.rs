//! Redis-backed credential cache.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::cache::{CacheError, CacheKey, CredentialCache};

/// A [`CredentialCache`] backed by Redis.
///
/// Every command is bounded by `deadline`; an elapsed deadline surfaces as
/// [`CacheError::DeadlineExceeded`] rather than hanging the request.
#[derive(Clone)]
pub struct RedisCredentialCache {
    connection: ConnectionManager,
    deadline: Duration,
}

impl std::fmt::Debug for RedisCredentialCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCredentialCache")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl RedisCredentialCache {
    /// Connect to the Redis server at `url`.
    pub async fn connect(url: &str, deadline: Duration) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(CacheError::Unavailable)?;

        let connection = timeout(deadline, client.get_connection_manager())
            .await
            .map_err(|_elapsed| CacheError::DeadlineExceeded(deadline))?
            .map_err(CacheError::Unavailable)?;

        debug!("connected to credential cache");

        Ok(Self {
            connection,
            deadline,
        })
    }

    async fn bounded<T, F>(&self, operation: &'static str, command: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, RedisError>>,
    {
        match timeout(self.deadline, command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                warn!("cache {operation} failed: {error}");

                Err(CacheError::Unavailable(error))
            }
            Err(_elapsed) => {
                warn!("cache {operation} exceeded {:?}", self.deadline);

                Err(CacheError::DeadlineExceeded(self.deadline))
            }
        }
    }
}

#[async_trait]
impl CredentialCache for RedisCredentialCache {
    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        // Redis rejects a zero expiry, so round sub-second TTLs up.
        let seconds = ttl.as_secs().max(1);

        self.bounded("set", connection.set_ex::<_, _, ()>(key.as_str(), value, seconds))
            .await
    }

    async fn get(&self, key: &CacheKey) -> Result<String, CacheError> {
        let mut connection = self.connection.clone();

        self.bounded("get", connection.get::<_, Option<String>>(key.as_str()))
            .await?
            .ok_or(CacheError::NotFound)
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();

        self.bounded("delete", connection.del::<_, ()>(key.as_str()))
            .await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        let ping = async move { redis::cmd("PING").query_async(&mut connection).await };

        self.bounded::<String, _>("ping", ping)
            .await
            .map(|_pong| ())
    }
}
