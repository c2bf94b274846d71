//! Users service errors.

use std::time::Duration;

use thiserror::Error;

use crate::database::QueryError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user not found")]
    NotFound,

    #[error("email already taken")]
    EmailTaken,

    #[error("user query exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<QueryError> for UsersServiceError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::Sql(sqlx::Error::RowNotFound) => Self::NotFound,
            QueryError::Sql(sqlx::Error::Database(source)) if source.is_unique_violation() => {
                Self::EmailTaken
            }
            QueryError::Sql(source) => Self::Sql(source),
            QueryError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
        }
    }
}
