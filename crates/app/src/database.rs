//! Database connection management

use std::{future::Future, time::Duration};

use sqlx::PgPool;
use thiserror::Error;
use tokio::time::timeout;

/// A query failed or ran out of time.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("storage error")]
    Sql(#[source] sqlx::Error),

    #[error("query exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),
}

/// Connection pool with a per-query deadline.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    deadline: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool, deadline: Duration) -> Self {
        Self { pool, deadline }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `query`, failing with [`QueryError::DeadlineExceeded`] once the
    /// deadline elapses.
    pub async fn bounded<T, F>(&self, query: F) -> Result<T, QueryError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        timeout(self.deadline, query)
            .await
            .map_err(|_elapsed| QueryError::DeadlineExceeded(self.deadline))?
            .map_err(QueryError::Sql)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
