//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        errors::UsersServiceError,
        records::{NewUser, UserCredentials, UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgUsersRepository::new(db),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn find_credentials(&self, email: &str) -> Result<UserCredentials, UsersServiceError> {
        self.repository
            .find_credentials(email)
            .await
            .map_err(Into::into)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        self.repository
            .create_user(user)
            .await
            .map_err(Into::into)
    }

    async fn mark_email_verified(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        self.repository
            .mark_email_verified(user)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// User storage needed by authentication.
pub trait UsersService: Send + Sync {
    /// Credentials for the user registered under `email` (case-insensitive).
    async fn find_credentials(&self, email: &str) -> Result<UserCredentials, UsersServiceError>;

    /// Insert a user. A duplicate email is [`UsersServiceError::EmailTaken`].
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Record that `user` proved ownership of their email address.
    async fn mark_email_verified(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}
