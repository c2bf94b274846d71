//! Credential cache errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
/// Credential cache failures.
pub enum CacheError {
    /// Key is absent or has expired.
    #[error("cache entry not found")]
    NotFound,

    /// The store did not answer within the request deadline.
    #[error("cache operation exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    /// The store could not be reached or rejected the command.
    #[error("cache unavailable")]
    Unavailable(#[source] redis::RedisError),
}
