//! Auth errors.

use std::time::Duration;

use thiserror::Error;

use crate::{
    auth::PasswordError, cache::CacheError, domain::users::UsersServiceError,
    security::SigningError,
};

/// Token service failures.
///
/// Every structural, cryptographic and expiry failure collapses into
/// [`TokenServiceError::InvalidToken`] so callers cannot tell a forged token
/// from an expired one.
#[derive(Debug, Error)]
pub enum TokenServiceError {
    #[error("invalid token")]
    InvalidToken,

    #[error("token subject must be non-empty and must not contain '.'")]
    InvalidSubject,

    #[error("credential cache exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("credential cache unavailable")]
    CacheUnavailable(#[source] CacheError),

    #[error("entropy source failed")]
    RandomGeneration(#[source] rand::Error),

    #[error("token could not be signed")]
    Signing(#[from] SigningError),
}

impl TokenServiceError {
    /// Whether retrying the same call later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::DeadlineExceeded(_) | Self::CacheUnavailable(_))
    }
}

impl From<CacheError> for TokenServiceError {
    fn from(error: CacheError) -> Self {
        match error {
            CacheError::NotFound => Self::InvalidToken,
            CacheError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
            CacheError::Unavailable(_) => Self::CacheUnavailable(error),
        }
    }
}

/// Session and verification flow failures.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid token")]
    InvalidToken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already taken")]
    EmailTaken,

    #[error("operation exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    #[error("credential cache unavailable")]
    Cache(#[source] CacheError),

    #[error("user lookup failed")]
    Users(#[source] UsersServiceError),

    #[error("entropy source failed")]
    Entropy(#[source] rand::Error),

    #[error("password verification failed")]
    Password(#[source] PasswordError),

    #[error("token could not be signed")]
    Signing(#[source] SigningError),
}

impl From<TokenServiceError> for AuthServiceError {
    fn from(error: TokenServiceError) -> Self {
        match error {
            TokenServiceError::InvalidToken | TokenServiceError::InvalidSubject => {
                Self::InvalidToken
            }
            TokenServiceError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
            TokenServiceError::CacheUnavailable(source) => Self::Cache(source),
            TokenServiceError::RandomGeneration(source) => Self::Entropy(source),
            TokenServiceError::Signing(source) => Self::Signing(source),
        }
    }
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::NotFound => Self::InvalidCredentials,
            UsersServiceError::EmailTaken => Self::EmailTaken,
            UsersServiceError::DeadlineExceeded(deadline) => Self::DeadlineExceeded(deadline),
            UsersServiceError::Sql(_) => Self::Users(error),
        }
    }
}

impl From<PasswordError> for AuthServiceError {
    fn from(error: PasswordError) -> Self {
        Self::Password(error)
    }
}
