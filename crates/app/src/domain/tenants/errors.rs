//! Tenants service errors.

use std::time::Duration;

use thiserror::Error;

use crate::database::QueryError;

#[derive(Debug, Error)]
pub enum TenantsServiceError {
    #[error("tenant not found")]
    NotFound,

    #[error("tenant lookup exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<QueryError> for TenantsServiceError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::Sql(sqlx::Error::RowNotFound) => Self::NotFound,
            QueryError::Sql(source) => Self::Sql(source),
            QueryError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
        }
    }
}
