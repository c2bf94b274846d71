//! Memberships service errors.

use std::time::Duration;

use thiserror::Error;

use crate::database::QueryError;

#[derive(Debug, Error)]
pub enum MembershipsServiceError {
    #[error("membership not found")]
    NotFound,

    #[error("membership lookup exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<QueryError> for MembershipsServiceError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::Sql(sqlx::Error::RowNotFound) => Self::NotFound,
            QueryError::Sql(source) => Self::Sql(source),
            QueryError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
        }
    }
}
